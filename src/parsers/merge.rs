use tracing::debug;

use crate::models::{DetailBlock, Post};

/// Fold detail blocks into the schedule by exact title.
///
/// Only the first schedule post with a matching title is updated; a block
/// with no match becomes a standalone post appended at the end. Empty block
/// fields never erase what the schedule already holds.
pub fn merge_detail_blocks(mut posts: Vec<Post>, blocks: &[DetailBlock]) -> Vec<Post> {
    for block in blocks {
        let matches = posts.iter().filter(|post| post.title == block.title).count();
        if matches > 1 {
            debug!(
                "Title '{}' is scheduled {} times, only the first gets the detail block",
                block.title, matches
            );
        }

        match posts.iter_mut().find(|post| post.title == block.title) {
            Some(post) => {
                debug!("Merging detail block into scheduled post '{}'", block.title);
                apply_block(post, block);
            }
            None => {
                debug!("Detail block '{}' has no scheduled post, adding it", block.title);
                let mut post = Post::titled(&block.title);
                apply_block(&mut post, block);
                posts.push(post);
            }
        }
    }

    posts
}

fn apply_block(post: &mut Post, block: &DetailBlock) {
    if !block.caption.is_empty() {
        post.caption = Some(block.caption.clone());
    }
    if !block.hashtags.is_empty() {
        post.hashtags = block.hashtags.clone();
    }
    if !block.media_url.is_empty() {
        post.media_url = Some(block.media_url.clone());
    }
    if let Some(post_type) = &block.post_type {
        post.post_type = post_type.clone();
    }
}
