use board_client::{FeedSource, MemorySource, RawBoard, RawBoardStats, RawPost, SortKind};
use feed_engine::{FeedConfig, HomeFeed};
use plebhome_core::CoreError;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter("plebhome=debug,feed_engine=debug,board_client=debug")
        .init();

    tracing::info!("Starting Plebhome - decentralized board home feed");

    let config = FeedConfig::default();
    let now = chrono::Utc::now().timestamp();

    // A small simulated network so the pipeline has something to chew on.
    // The real client swaps this for the network-backed feed source.
    let mut source = MemorySource::new()
        .with_board(RawBoard::new("business-and-finance.eth").with_title("Business & Finance"))
        .with_board(RawBoard::new("bitcoinbrothers.eth").with_title("Bitcoin Brothers"))
        .with_board(RawBoard::new("plebmusic.eth").with_title("Music"))
        .with_post(
            RawPost::new("QmMarket", "business-and-finance.eth", now - 3_600)
                .with_title("market open thread")
                .with_link("https://example.com/chart.png")
                .with_reply_count(12),
        )
        .with_post(
            RawPost::new("QmHalving", "bitcoinbrothers.eth", now - 7_200)
                .with_title("halving countdown")
                .with_link("https://example.com/blocks.jpg")
                .with_reply_count(7),
        )
        .with_post(
            RawPost::new("QmAlbum", "plebmusic.eth", now - 1_800)
                .with_title("album of the week")
                .with_link("https://example.com/cover.webp")
                .with_reply_count(3),
        )
        .with_stats(
            "business-and-finance.eth",
            RawBoardStats {
                hour_post_count: 4,
                day_post_count: 31,
                all_post_count: 1_204,
                all_active_user_count: 86,
                ..Default::default()
            },
        )
        .with_stats(
            "bitcoinbrothers.eth",
            RawBoardStats {
                all_post_count: 640,
                all_active_user_count: 51,
                ..Default::default()
            },
        );

    let board_addresses: Vec<String> = source
        .list_boards()?
        .into_iter()
        .filter_map(|board| board.address)
        .collect();

    let events = source.subscribe(&board_addresses, SortKind::Active, config.catalog_page_size);
    let column_width = config.column_width;
    let engine = HomeFeed::new(config);
    let handle = engine.handle();
    let engine_task = tokio::spawn(engine.run(events));

    let mut subscription = handle.subscribe();
    if subscription.changed().await {
        let snapshot = subscription.current();
        tracing::info!(
            "home snapshot v{}: {} boards, {} posts, {} users",
            snapshot.version,
            snapshot.global_stats.board_count,
            snapshot.global_stats.post_count,
            snapshot.global_stats.user_count
        );
        for item in &snapshot.popular_posts {
            tracing::info!(
                "popular: [{}] {}",
                item.board_label(),
                item.post.title.as_deref().unwrap_or("<untitled>")
            );
        }
        let columns = feed_engine::column_count(900, column_width);
        for row in subscription.board_rows("business-and-finance.eth", columns) {
            tracing::info!("catalog row: {} cells", row.len());
        }
    }

    // Let a late stats refresh coalesce through before shutting down.
    source.push_stats(
        "plebmusic.eth",
        RawBoardStats {
            all_post_count: 97,
            all_active_user_count: 14,
            ..Default::default()
        },
    );
    tokio::time::sleep(Duration::from_millis(200)).await;
    tracing::info!("final totals: {:?}", handle.global_stats());

    drop(source);
    engine_task.await.map_err(|e| CoreError::Internal {
        message: format!("engine task failed: {e}"),
    })?;

    Ok(())
}
