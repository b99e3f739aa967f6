//! Review command handlers for the CLI.
//!
//! The acting user comes from `STOREFRONT_USER_ID` / `STOREFRONT_ACCESS_TOKEN`;
//! without both the actor is anonymous and the gate answers locally.

use clap::Subcommand;
use storefront_api::CommerceClient;
use storefront_core::{AppConfig, ItemId};
use storefront_flow::{EligibilityGate, ReviewSubmissionFlow, SubmitError};

/// Sub-commands available under `reviews`.
#[derive(Debug, Subcommand)]
pub enum ReviewsCommands {
    /// Show one page of an item's reviews and the page's average rating
    List {
        #[arg(long)]
        item: String,
        #[arg(long, default_value = "1")]
        page: u32,
        /// Page size; defaults to `STOREFRONT_REVIEWS_PAGE_SIZE`
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Check whether the configured user may review an item
    Eligibility {
        #[arg(long)]
        item: String,
    },
    /// Submit a review as the configured user
    Submit {
        #[arg(long)]
        item: String,
        /// Star rating, 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: String,
        #[arg(long)]
        title: Option<String>,
    },
}

pub(crate) async fn run_reviews(
    client: &CommerceClient,
    config: &AppConfig,
    command: ReviewsCommands,
) -> anyhow::Result<()> {
    match command {
        ReviewsCommands::List { item, page, limit } => {
            run_list(client, config, ItemId::new(item), page, limit).await
        }
        ReviewsCommands::Eligibility { item } => {
            run_eligibility(client, config, &ItemId::new(item)).await;
            Ok(())
        }
        ReviewsCommands::Submit {
            item,
            rating,
            comment,
            title,
        } => run_submit(client, config, ItemId::new(item), rating, comment, title).await,
    }
}

async fn run_list(
    client: &CommerceClient,
    config: &AppConfig,
    item: ItemId,
    page: u32,
    limit: Option<u32>,
) -> anyhow::Result<()> {
    let mut flow = ReviewSubmissionFlow::new(item, limit.unwrap_or(config.reviews_page_size));
    flow.load_reviews(client, page).await?;

    let Some(listing) = flow.reviews() else {
        return Ok(());
    };
    let p = &listing.pagination;
    println!(
        "{}: page {} of {} ({} reviews)",
        flow.item(),
        p.page,
        p.total_pages.max(1),
        p.total
    );

    match flow.average_rating() {
        Some(avg) if flow.average_is_partial() => {
            println!("average {avg:.1} (this page only)");
        }
        Some(avg) => println!("average {avg:.1}"),
        None => println!("no reviews yet"),
    }

    for review in &listing.reviews {
        let author = review.author.as_deref().unwrap_or("anonymous");
        println!();
        let date = review
            .created_at
            .map_or_else(|| "undated".to_string(), |d| d.format("%Y-%m-%d").to_string());
        println!("{date} {}/5 by {author}", review.rating);
        if let Some(title) = &review.title {
            println!("{title}");
        }
        println!("{}", review.comment);
    }
    Ok(())
}

async fn run_eligibility(client: &CommerceClient, config: &AppConfig, item: &ItemId) {
    let mut gate = EligibilityGate::new();
    let verdict = gate.check(client, &config.actor(), item).await;
    match verdict.reason_code() {
        Some(code) => println!("{item}: {verdict} [{code}]"),
        None => println!("{item}: {verdict}"),
    }
}

/// Checks eligibility, then submits through the review flow.
///
/// # Errors
///
/// Returns an error if the draft is invalid, the user is not eligible, or
/// the server rejects the review. The server's message is reported as-is.
async fn run_submit(
    client: &CommerceClient,
    config: &AppConfig,
    item: ItemId,
    rating: u8,
    comment: String,
    title: Option<String>,
) -> anyhow::Result<()> {
    let actor = config.actor();
    let mut gate = EligibilityGate::new();
    gate.check(client, &actor, &item).await;

    let mut flow = ReviewSubmissionFlow::new(item, config.reviews_page_size);
    flow.open_form(&gate, &actor);
    flow.set_rating(rating);
    flow.set_comment(comment);
    flow.set_title(title);

    match flow.submit(client, &mut gate, &actor).await {
        Ok(review) => {
            println!("submitted review {} for {}", review.id, flow.item());
            if let Some(avg) = flow.average_rating() {
                println!("average rating is now {avg:.1}");
            }
            Ok(())
        }
        Err(SubmitError::NotEligible(verdict)) => anyhow::bail!("{verdict}"),
        Err(e) => Err(e.into()),
    }
}
