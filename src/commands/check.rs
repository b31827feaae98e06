//! Validate the catalog against the assets directory

use anyhow::Result;

use crate::Blog;

/// Report catalog problems; fails if any are found
pub fn run(blog: &Blog) -> Result<()> {
    let problems = blog.catalog.validate(&blog.assets_dir);

    if problems.is_empty() {
        println!("Catalog OK ({} posts)", blog.catalog.posts.len());
        return Ok(());
    }

    for problem in &problems {
        println!("  {}", problem);
    }
    anyhow::bail!("catalog has {} problem(s)", problems.len());
}
