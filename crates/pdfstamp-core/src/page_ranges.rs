//! Page selection spec parsing
//!
//! A spec is either the literal `all` or a comma-separated list of tokens,
//! each a single page number or a `low-high` range. Range bounds are
//! normalized (swapped if reversed) and clamped into `[1, total_pages]`;
//! single pages outside that interval are silently dropped. Malformed
//! (non-numeric) tokens abort the whole parse rather than being skipped:
//! an unparseable token means the spec itself is wrong, not merely out of
//! range.

use std::collections::BTreeSet;

use crate::error::StampError;

/// Parse a page spec like `all`, `1,3,5` or `10-20` into a sorted,
/// deduplicated set of 1-indexed page numbers bounded by `total_pages`.
///
/// An empty spec yields an empty set; callers decide whether that is an
/// error (the stamping pipeline reports it as [`StampError::EmptySelection`]).
pub fn parse_page_spec(spec: &str, total_pages: u32) -> Result<BTreeSet<u32>, StampError> {
    let mut pages = BTreeSet::new();

    let spec = spec.trim();
    if spec.is_empty() {
        return Ok(pages);
    }
    if spec == "all" {
        pages.extend(1..=total_pages);
        return Ok(pages);
    }

    for token in spec.split(',') {
        let token = token.trim();
        if let Some((low, high)) = token.split_once('-') {
            let low = parse_page_number(low)?;
            let high = parse_page_number(high)?;
            let (low, high) = if low > high { (high, low) } else { (low, high) };
            // Clamp rather than error: out-of-range endpoints clip silently.
            let low = low.max(1);
            let high = high.min(total_pages);
            for page in low..=high {
                pages.insert(page);
            }
        } else {
            let page = parse_page_number(token)?;
            if page >= 1 && page <= total_pages {
                pages.insert(page);
            }
        }
    }

    Ok(pages)
}

fn parse_page_number(token: &str) -> Result<u32, StampError> {
    token
        .trim()
        .parse()
        .map_err(|_| StampError::InvalidSpec(format!("invalid page number: {:?}", token.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(pages: &[u32]) -> BTreeSet<u32> {
        pages.iter().copied().collect()
    }

    #[test]
    fn all_selects_every_page() {
        assert_eq!(parse_page_spec("all", 4).unwrap(), set(&[1, 2, 3, 4]));
    }

    #[test]
    fn single_page() {
        assert_eq!(parse_page_spec("5", 10).unwrap(), set(&[5]));
    }

    #[test]
    fn page_range() {
        assert_eq!(parse_page_spec("2-4", 10).unwrap(), set(&[2, 3, 4]));
    }

    #[test]
    fn mixed_ranges_and_pages() {
        assert_eq!(
            parse_page_spec("1-3, 5, 8-10", 10).unwrap(),
            set(&[1, 2, 3, 5, 8, 9, 10])
        );
    }

    #[test]
    fn reversed_range_is_swapped() {
        assert_eq!(parse_page_spec("4-2", 10).unwrap(), set(&[2, 3, 4]));
    }

    #[test]
    fn range_clamps_to_document() {
        assert_eq!(parse_page_spec("0-3", 10).unwrap(), set(&[1, 2, 3]));
        assert_eq!(
            parse_page_spec("8-20", 10).unwrap(),
            set(&[8, 9, 10])
        );
    }

    #[test]
    fn range_entirely_outside_yields_nothing() {
        assert_eq!(parse_page_spec("12-15", 10).unwrap(), set(&[]));
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(parse_page_spec("1,1,2,2-2", 10).unwrap(), set(&[1, 2]));
    }

    #[test]
    fn out_of_range_single_pages_dropped() {
        assert_eq!(parse_page_spec("0, 1, 2, 99", 10).unwrap(), set(&[1, 2]));
    }

    #[test]
    fn empty_spec_yields_empty_set() {
        assert_eq!(parse_page_spec("", 10).unwrap(), set(&[]));
        assert_eq!(parse_page_spec("   ", 10).unwrap(), set(&[]));
    }

    #[test]
    fn malformed_token_is_fatal() {
        assert!(matches!(
            parse_page_spec("abc", 10),
            Err(StampError::InvalidSpec(_))
        ));
        assert!(matches!(
            parse_page_spec("1,,2", 10),
            Err(StampError::InvalidSpec(_))
        ));
        assert!(matches!(
            parse_page_spec("1-x", 10),
            Err(StampError::InvalidSpec(_))
        ));
    }

    #[test]
    fn whitespace_around_tokens_tolerated() {
        assert_eq!(parse_page_spec("  1 , 2 , 3  ", 10).unwrap(), set(&[1, 2, 3]));
        assert_eq!(parse_page_spec(" 1 - 3 ", 10).unwrap(), set(&[1, 2, 3]));
    }
}
