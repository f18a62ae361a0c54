//! Speedread Metrics
//!
//! Reading-speed formulas. Sample counts (lines, pages, minutes) are divisors
//! and are typed `NonZeroU32`; substituting a default for blank or zero input
//! is the caller's job, see [`divisor_or_one`].

use std::num::NonZeroU32;

/// Lines counted when estimating words per line, unless the reader picks another sample.
pub const DEFAULT_SAMPLE_LINES: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// Pages counted when estimating lines per page.
pub const DEFAULT_SAMPLE_PAGES: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// Length of a timed reading test in minutes.
pub const DEFAULT_MINUTES: NonZeroU32 = NonZeroU32::new(3).unwrap();

/// Map a raw divisor to a usable one: `0` becomes `1`.
pub fn divisor_or_one(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
}

/// Average words on one line, given the words counted over `sample_lines` lines.
pub fn words_per_line(words_in_lines: u32, sample_lines: NonZeroU32) -> u32 {
    words_in_lines / sample_lines.get()
}

/// Average lines on one page, given the lines counted over `sample_pages` pages.
pub fn lines_per_page(lines_in_pages: u32, sample_pages: NonZeroU32) -> u32 {
    lines_in_pages / sample_pages.get()
}

/// Average words on one page.
///
/// Each average is floored before multiplying, so `avg_words_per_page(23, 180, 5, 5)`
/// is `4 * 36`, not `floor(23 * 180 / 25)`.
pub fn avg_words_per_page(
    words_in_lines: u32,
    lines_in_pages: u32,
    sample_lines: NonZeroU32,
    sample_pages: NonZeroU32,
) -> u32 {
    let wpl = words_per_line(words_in_lines, sample_lines);
    let lpp = lines_per_page(lines_in_pages, sample_pages);
    wpl.saturating_mul(lpp)
}

/// Words read per minute over a timed test.
pub fn words_per_minute(lines_read: u32, words_per_line: u32, minutes_spent: NonZeroU32) -> u32 {
    let words = u64::from(lines_read) * u64::from(words_per_line);
    let wpm = words / u64::from(minutes_spent.get());
    u32::try_from(wpm).unwrap_or(u32::MAX)
}

/// Seconds to spend on each line to hold `desired_wpm`.
///
/// Pacing drills run at three times the target speed, hence the factor of 3.
pub fn time_per_line(desired_wpm: NonZeroU32, words_per_line: u32) -> f64 {
    let minute_fraction = f64::from(words_per_line) / (3.0 * f64::from(desired_wpm.get()));
    minute_fraction * 60.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn words_per_minute_floors() {
        assert_eq!(words_per_minute(10, 8, nz(3)), 26);
        assert_eq!(words_per_minute(0, 8, DEFAULT_MINUTES), 0);
        assert_eq!(words_per_minute(30, 10, DEFAULT_MINUTES), 100);
    }

    #[test]
    fn words_per_minute_does_not_overflow() {
        assert_eq!(words_per_minute(u32::MAX, u32::MAX, nz(1)), u32::MAX);
        assert_eq!(words_per_minute(u32::MAX, 2, nz(2)), u32::MAX);
    }

    #[test]
    fn time_per_line_for_target_pace() {
        // 8 / (3 * 120) minutes
        assert!((time_per_line(nz(120), 8) - 4.0 / 3.0).abs() < 1e-9);
        assert!((time_per_line(nz(40), 8) - 4.0).abs() < 1e-9);
        assert_eq!(time_per_line(nz(100), 0), 0.0);
        assert!((time_per_line(nz(200), 10) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn avg_words_per_page_uses_defaults() {
        // 52 words over 5 lines -> 10 wpl, 190 lines over 5 pages -> 38 lpp
        assert_eq!(
            avg_words_per_page(52, 190, DEFAULT_SAMPLE_LINES, DEFAULT_SAMPLE_PAGES),
            380
        );
    }

    #[test]
    fn divisor_substitution() {
        assert_eq!(divisor_or_one(0).get(), 1);
        assert_eq!(divisor_or_one(1).get(), 1);
        assert_eq!(divisor_or_one(7).get(), 7);
    }

    proptest! {
        #[test]
        fn words_per_line_is_floor_division(w in any::<u32>(), l in 1u32..) {
            prop_assert_eq!(words_per_line(w, nz(l)), w / l);
        }

        #[test]
        fn lines_per_page_is_floor_division(w in any::<u32>(), p in 1u32..) {
            prop_assert_eq!(lines_per_page(w, nz(p)), w / p);
        }

        #[test]
        fn avg_words_per_page_is_product_of_floors(
            a in 0u32..50_000,
            l in 0u32..50_000,
            p in 1u32..1_000,
            q in 1u32..1_000,
        ) {
            prop_assert_eq!(avg_words_per_page(a, l, nz(p), nz(q)), (a / p) * (l / q));
        }
    }
}
