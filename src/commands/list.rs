//! List catalog posts

use anyhow::Result;

use crate::helpers::format_date;
use crate::Blog;

/// Print every post, newest first
pub fn run(blog: &Blog) -> Result<()> {
    let posts = blog.catalog.ordered();
    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}]",
            format_date(post.date),
            post.name,
            post.identity()
        );
    }
    Ok(())
}
