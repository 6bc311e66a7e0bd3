//! First-run content.
//!
//! Seeding goes through the public notebook API, so the welcome stream obeys
//! the same validation and limits as user content.

use papyrus_core::{
    BlockApi, BlockDraft, BlockType, NotebookApi, NotebookError, StreamApi, StreamSummary,
};
use tracing::info;

pub const WELCOME_STREAM_NAME: &str = "Welcome to Papyrus Lite";

const WELCOME_MARKDOWN: &str = "# Welcome to Papyrus Lite!\n\n\
This is a sample markdown block. You can:\n\
- Add new blocks\n\
- Reorder blocks using the up/down arrows\n\
- Toggle blocks in/out of AI context\n\
- Delete blocks\n\n\
Try creating your own blocks!";

const WELCOME_PROMPT: &str = "This is a placeholder prompt block. In future modules, \
this will allow you to send prompts to AI models.";

/// Create the welcome stream if the notebook has no streams yet.
///
/// Returns the new stream, or `None` when streams already exist.
pub async fn seed_welcome_stream(
    notebook: &dyn NotebookApi,
) -> Result<Option<StreamSummary>, NotebookError> {
    if !notebook.list_streams().await?.is_empty() {
        info!("Existing streams found, skipping seed");
        return Ok(None);
    }

    let summary = notebook.create_stream(WELCOME_STREAM_NAME).await?;
    let stream_id = summary.stream.id.clone();

    notebook
        .create_block(BlockDraft::new(
            stream_id.clone(),
            BlockType::Markdown,
            WELCOME_MARKDOWN,
            0,
        ))
        .await?;
    notebook
        .create_block(BlockDraft::new(
            stream_id.clone(),
            BlockType::Prompt,
            WELCOME_PROMPT,
            1,
        ))
        .await?;

    info!(stream_id = %stream_id, blocks = 2, "Seeded welcome stream");
    Ok(Some(StreamSummary {
        block_count: 2,
        ..summary
    }))
}
