use anyhow::Result;
use indicatif::ProgressBar;
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::article::Article;
use crate::file_utils::FileManager;
use crate::media::{ImageLookup, MediaSet};
use crate::normalizer::format_duration;

// @module: Rendering of articles into site content files

/// Default separator for list-valued metadata
pub const DEFAULT_LIST_SEPARATOR: &str = ";";

/// Render one article: title, underline, metadata block, description
pub fn render_article(article: &Article, media: Option<&MediaSet>, separator: &str) -> String {
    let join = |items: &Option<Vec<String>>| items.as_ref().map(|items| items.join(separator));

    let metadata: [(&str, Option<String>); 21] = [
        ("slug", Some(article.slug_web.clone())),
        ("date", Some(article.created.format("%Y-%m-%d").to_string())),
        ("tags", Some(article.tags.join(separator))),
        ("summary", Some(article.summary.clone())),
        ("category", article.category.map(|category| category.to_string())),
        ("authors", join(&article.authors)),
        ("release_year", Some(article.release_year.to_string())),
        ("duration", article.duration.as_ref().map(format_duration)),
        ("language", article.language.clone()),
        ("country", article.country.clone()),
        ("free_access", Some(if article.free_access { "yes" } else { "no" }.to_string())),
        ("events", join(&article.events)),
        ("people", join(&article.people)),
        ("sponsors", join(&article.sponsors)),
        ("production", join(&article.production)),
        ("player", article.player.clone()),
        ("link_trailer", article.link_trailer.clone()),
        ("link_stream", article.link_stream.clone()),
        ("link_official", article.link_official.clone()),
        ("medias_main_img", media.and_then(|media| media.main_img.clone())),
        ("medias_thumbnail", media.and_then(|media| media.thumbnail.clone())),
    ];

    let mut out = String::new();
    out.push_str(&article.title);
    out.push('\n');
    out.push_str(&"#".repeat(article.title.chars().count()));
    out.push_str("\n\n");

    for (key, value) in metadata {
        // Absent fields and empty lists are left out
        let Some(value) = value.filter(|value| !value.is_empty()) else {
            continue;
        };
        out.push(':');
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&article.description);
    out.push('\n');
    out
}

/// Writes articles under the articles directory, one file per article
pub struct ContentWriter {
    // @field: Root of the generated articles, wiped on every run
    articles_dir: PathBuf,
    // @field: File extension without the dot
    extension: String,
    // @field: Separator for list-valued metadata
    separator: String,
}

impl ContentWriter {
    pub fn new<P: AsRef<Path>>(articles_dir: P, extension: &str, separator: &str) -> Self {
        Self {
            articles_dir: articles_dir.as_ref().to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
            separator: separator.to_string(),
        }
    }

    pub fn articles_dir(&self) -> &Path {
        &self.articles_dir
    }

    /// `<articles_dir>/[<category>/]<slug_fs>.<ext>`
    pub fn article_path(&self, article: &Article) -> PathBuf {
        let file_name = format!("{}.{}", article.slug_fs, self.extension);
        match &article.category {
            Some(category) => self.articles_dir.join(category.as_str()).join(file_name),
            None => self.articles_dir.join(file_name),
        }
    }

    /// Remove everything under the articles directory
    pub fn clean(&self) -> Result<Vec<PathBuf>> {
        let removed = FileManager::clear_dir(&self.articles_dir)?;
        for path in &removed {
            debug!("Removed: {:?}", path);
        }
        Ok(removed)
    }

    /// Clear previous output and write every article
    pub fn write_all(&self, articles: &[Article], images: &dyn ImageLookup, progress: &ProgressBar) -> Result<Vec<PathBuf>> {
        let removed = self.clean()?;
        info!("Cleared {} previous entries from {:?}", removed.len(), self.articles_dir);

        let mut written = Vec::with_capacity(articles.len());
        for article in articles {
            let path = self.write_article(article, images.lookup(&article.slug_fs))?;
            progress.set_message(article.slug_fs.clone());
            progress.inc(1);
            written.push(path);
        }

        progress.finish_and_clear();
        Ok(written)
    }

    /// Render and write a single article, overwriting any same-named file
    pub fn write_article(&self, article: &Article, media: Option<&MediaSet>) -> Result<PathBuf> {
        let path = self.article_path(article);
        let content = render_article(article, media, &self.separator);
        FileManager::write_to_file(&path, &content)?;
        debug!("Wrote: {:?}", path);
        Ok(path)
    }
}
