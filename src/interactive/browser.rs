use anyhow::{bail, Context, Result};

/// Hand `url` to the platform's default handler.
pub fn open_in_browser(url: &str) -> Result<()> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("refusing to open non-http link {url:?}");
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("explorer")
            .arg(url)
            .spawn()
            .context("failed to spawn explorer")?;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to spawn open")?;
        Ok(())
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to spawn xdg-open")?;
        Ok(())
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        bail!("opening links is not supported on this platform")
    }
}

#[cfg(test)]
mod tests {
    use super::open_in_browser;

    #[test]
    fn rejects_non_http_links() {
        assert!(open_in_browser(crate::extractor::DOWNLOAD_NOT_FOUND).is_err());
        assert!(open_in_browser("file:///etc/passwd").is_err());
    }
}
