//! Convenience macros for working with instrument identifiers.

/// Creates a [`DeviceId`](crate::addressing::DeviceId) from group/number notation.
///
/// Field instruments are organized on the radio network by a group byte and a
/// device number within the group; the `device!` macro mirrors the notation
/// used on calibration sheets.
///
/// # Syntax
///
/// ```text
/// device!(group/number)
/// ```
///
/// # Examples
///
/// ```
/// use fieldlink::device;
///
/// let pressure_tx = device!(3/12);
/// assert_eq!(pressure_tx.group(), 3);
/// assert_eq!(pressure_tx.number(), 12);
/// ```
///
/// # Compile-Time Validation
///
/// Both components are validated at compile time against the one-byte wire
/// width:
///
/// ```compile_fail
/// // This will fail to compile: group > 255
/// let id = fieldlink::device!(300/1);
/// ```
#[macro_export]
macro_rules! device {
    ($group:literal / $number:literal) => {{
        const _: () = {
            if $group > 255 {
                panic!("Device group must be 0-255");
            }
            if $number > 255 {
                panic!("Device number must be 0-255");
            }
        };
        $crate::addressing::DeviceId::new($group as u8, $number as u8)
    }};
}
