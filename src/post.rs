//! Post text formatting.

use chrono::NaiveDate;

use crate::ports::QuoteRecord;

/// Build the post text for a quote, dated `date`.
///
/// ```text
/// January 05, 2026
///
/// Title: Season 1, Episode 2
///
/// Quote text
///
/// #hashtag
/// ```
#[must_use]
pub fn format_post(record: &QuoteRecord, date: NaiveDate, hashtag: &str) -> String {
    let mut text = format!(
        "{}\n\n{}: {}\n\n{}",
        date.format("%B %d, %Y"),
        record.title,
        record.season_episode,
        record.quote
    );
    if !hashtag.is_empty() {
        text.push_str("\n\n");
        text.push_str(hashtag);
    }
    text
}

/// Length of a post as the platform counts it (characters, not bytes).
#[must_use]
pub fn post_length(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(quote: &str) -> QuoteRecord {
        QuoteRecord {
            number: 1,
            title: "Coffin Flop".into(),
            season_episode: "Season 1, Episode 1".into(),
            quote: quote.into(),
            image_ref: "image-a-1x1-jpg".into(),
        }
    }

    #[test]
    fn formats_date_title_quote_and_hashtag() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let text = format_post(&record("Look at him go."), date, "#itysl");
        assert_eq!(
            text,
            "January 05, 2026\n\nCoffin Flop: Season 1, Episode 1\n\nLook at him go.\n\n#itysl"
        );
    }

    #[test]
    fn empty_hashtag_is_omitted() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let text = format_post(&record("Look at him go."), date, "");
        assert!(text.ends_with("\n\nLook at him go."));
    }

    #[test]
    fn quote_whitespace_is_kept_and_counted() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let padded = format_post(&record("  padded  "), date, "");
        let bare = format_post(&record("padded"), date, "");
        assert!(padded.ends_with("\n\n  padded  "));
        assert_eq!(post_length(&padded), post_length(&bare) + 4);
    }

    #[test]
    fn length_counts_characters() {
        assert_eq!(post_length("héllo"), 5);
        assert_eq!(post_length(""), 0);
    }
}
