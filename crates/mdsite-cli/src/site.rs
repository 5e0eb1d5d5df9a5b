//! Static site generation: copy assets, then render every markdown page
//! through the HTML template.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use mdsite_core::{extract_title, parse_document};

use crate::config::PathsConfig;
use crate::error::CliError;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// One markdown source and the HTML file it becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Page {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Totals reported after a successful build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BuildSummary {
    pub pages: usize,
    pub assets: usize,
}

/// Build the whole site described by `paths`.
///
/// Every page is attempted even when some fail. Failures are logged one by
/// one and summarized in the returned error.
pub(crate) fn build(paths: &PathsConfig) -> Result<BuildSummary, CliError> {
    let assets = copy_static(&paths.static_dir, &paths.public)?;

    let template = fs::read_to_string(&paths.template)
        .map_err(|e| CliError::io(&paths.template, e))?;

    let pages = collect_pages(&paths.content, &paths.public)?;
    let total = pages.len();

    let failed = pages
        .par_iter()
        .filter_map(|page| match generate_page_file(page, &template) {
            Ok(()) => None,
            Err(err) => {
                tracing::error!("{err}");
                Some(())
            }
        })
        .count();

    if failed > 0 {
        return Err(CliError::PagesFailed { failed, total });
    }

    Ok(BuildSummary {
        pages: total,
        assets,
    })
}

/// Replace `dest` with a fresh copy of `source`. Returns the number of files
/// copied.
pub(crate) fn copy_static(source: &Path, dest: &Path) -> Result<usize, CliError> {
    if !source.is_dir() {
        return Err(CliError::MissingDirectory(source.to_path_buf()));
    }

    if dest.exists() {
        tracing::debug!(path = %dest.display(), "removing previous output");
        fs::remove_dir_all(dest).map_err(|e| CliError::io(dest, e))?;
    }

    copy_dir(source, dest)
}

fn copy_dir(source: &Path, dest: &Path) -> Result<usize, CliError> {
    fs::create_dir_all(dest).map_err(|e| CliError::io(dest, e))?;

    let mut copied = 0;
    for entry in read_dir_sorted(source)? {
        let target = dest.join(entry.file_name().unwrap_or_default());
        if entry.is_dir() {
            copied += copy_dir(&entry, &target)?;
        } else {
            tracing::debug!(from = %entry.display(), to = %target.display(), "copying");
            fs::copy(&entry, &target).map_err(|e| CliError::io(&entry, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Walk `content` and map every `.md` file to an `.html` path under
/// `public` with the same relative location. Other files are skipped.
pub(crate) fn collect_pages(content: &Path, public: &Path) -> Result<Vec<Page>, CliError> {
    if !content.is_dir() {
        return Err(CliError::MissingDirectory(content.to_path_buf()));
    }

    let mut pages = Vec::new();
    collect_into(content, public, &mut pages)?;
    Ok(pages)
}

fn collect_into(dir: &Path, out_dir: &Path, pages: &mut Vec<Page>) -> Result<(), CliError> {
    for entry in read_dir_sorted(dir)? {
        let name = entry.file_name().unwrap_or_default();
        if entry.is_dir() {
            collect_into(&entry, &out_dir.join(name), pages)?;
        } else if entry.extension().is_some_and(|ext| ext == "md") {
            let dest = out_dir.join(name).with_extension("html");
            pages.push(Page {
                source: entry,
                dest,
            });
        } else {
            tracing::warn!(path = %entry.display(), "skipping non-markdown file");
        }
    }
    Ok(())
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| CliError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CliError::io(dir, e))?;
    entries.sort();
    Ok(entries)
}

/// Render one markdown document into the template.
pub(crate) fn generate_page(markdown: &str, template: &str) -> Result<String, CliError> {
    let html = parse_document(markdown)?.render()?;
    let title = extract_title(markdown)?;

    Ok(template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, &html))
}

fn generate_page_file(page: &Page, template: &str) -> Result<(), CliError> {
    tracing::info!(
        "generating page from {} to {}",
        page.source.display(),
        page.dest.display()
    );

    let wrap = |source: CliError| CliError::Page {
        path: page.source.clone(),
        source: Box::new(source),
    };

    let markdown = fs::read_to_string(&page.source)
        .map_err(|e| wrap(CliError::io(&page.source, e)))?;
    let html = generate_page(&markdown, template).map_err(wrap)?;

    if let Some(parent) = page.dest.parent() {
        fs::create_dir_all(parent).map_err(|e| wrap(CliError::io(parent, e)))?;
    }
    fs::write(&page.dest, html).map_err(|e| wrap(CliError::io(&page.dest, e)))
}
