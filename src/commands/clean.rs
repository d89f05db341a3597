//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::Site;

/// Remove the generated site
pub fn run(site: &Site) -> Result<()> {
    if site.output_dir.exists() {
        fs::remove_dir_all(&site.output_dir)?;
        tracing::info!("Deleted: {:?}", site.output_dir);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(site.output_dir.join("events")).unwrap();

        run(&site).unwrap();
        assert!(!site.output_dir.exists());
        // Nothing to do the second time
        run(&site).unwrap();
    }
}
