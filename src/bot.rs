//! One bot run: draw a number, fetch its quote and image, publish the post.

use std::path::PathBuf;

use chrono::NaiveDate;
use rand::Rng;
use tracing::{info, warn};

use crate::allocator::UniqueValueAllocator;
use crate::config::PostConfig;
use crate::error::BotError;
use crate::output::{image_path, remove_image, save_image};
use crate::params::format_mime;
use crate::post::{format_post, post_length};
use crate::ports::publisher::{MediaUpload, PostReceipt, PostRequest};
use crate::ports::{ImageFetcher, NumberStore, Publisher, QuoteRecord, QuoteSource};

/// Result of a run.
#[derive(Debug)]
pub struct PostOutcome {
    /// The quote that was used.
    pub record: QuoteRecord,
    /// Formatted post text.
    pub text: String,
    /// Where the image was saved. Removed after publishing unless kept.
    pub image_path: PathBuf,
    /// The created post, if the run published.
    pub receipt: Option<PostReceipt>,
}

/// Draw quotes until one fits the length limit.
///
/// Every number drawn is recorded as used, including ones whose post was too
/// long, so they are not drawn again this cycle.
///
/// # Errors
///
/// Fails on store or fetch errors, or with [`BotError::PostTooLong`] once
/// `max_redraws` extra draws have all been too long.
pub async fn draw_quote<S: NumberStore, R: Rng>(
    allocator: &mut UniqueValueAllocator<S, R>,
    quotes: &dyn QuoteSource,
    settings: &PostConfig,
    date: NaiveDate,
) -> Result<(QuoteRecord, String), BotError> {
    let mut draws = 0;
    loop {
        let number = allocator.allocate()?;
        draws += 1;
        info!(number, "drew quote number");

        let record = quotes.fetch_quote(number).await?;
        let text = format_post(&record, date, &settings.hashtag);
        let length = post_length(&text);
        if length <= settings.max_length {
            return Ok((record, text));
        }

        if draws > settings.max_redraws {
            return Err(BotError::PostTooLong { length, limit: settings.max_length, draws });
        }
        warn!(number, length, limit = settings.max_length, "post too long, drawing again");
    }
}

/// Run the whole flow. Without a publisher the post is prepared but not sent
/// and the image is kept.
///
/// # Errors
///
/// Propagates the first failure from any step; nothing is retried.
pub async fn run_post<S: NumberStore, R: Rng>(
    allocator: &mut UniqueValueAllocator<S, R>,
    quotes: &dyn QuoteSource,
    images: &dyn ImageFetcher,
    publisher: Option<&dyn Publisher>,
    settings: &PostConfig,
    date: NaiveDate,
) -> Result<PostOutcome, BotError> {
    let (record, text) = draw_quote(allocator, quotes, settings, date).await?;

    let image = images.fetch_image(&record.image_ref).await?;
    let path = image_path(&settings.image_dir, record.number, &settings.image_format);
    save_image(&image.data, &image.mime_type, &settings.image_format, &path)?;
    info!(path = %path.display(), url = %image.url, "saved image");

    let Some(publisher) = publisher else {
        return Ok(PostOutcome { record, text, image_path: path, receipt: None });
    };

    let media = publisher
        .upload_media(&MediaUpload {
            path: path.clone(),
            mime_type: format_mime(&settings.image_format).to_string(),
        })
        .await?;
    let receipt = publisher
        .create_post(&PostRequest { text: text.clone(), media_ids: vec![media.id] })
        .await?;
    info!(post_id = %receipt.id, number = record.number, "published post");

    if !settings.keep_images {
        remove_image(&path)?;
    }

    Ok(PostOutcome { record, text, image_path: path, receipt: Some(receipt) })
}
