/// Whole percentage of `received` out of `total`, floored and clamped to 100.
///
/// A zero `total` reports 0; callers should not emit progress for transfers
/// without a declared size.
///
/// # Examples
///
/// ```
/// use docfresh_fetch::percentage;
///
/// assert_eq!(percentage(1, 3), 33);
/// assert_eq!(percentage(500, 400), 100);
/// ```
pub fn percentage(received: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (u128::from(received) * 100) / u128::from(total);
    pct.min(100) as u8
}
