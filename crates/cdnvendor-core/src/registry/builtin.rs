//! Built-in catalog of CDN libraries commonly referenced by site themes.

use super::{AssetDescriptor, AssetKind};

const JSDELIVR: &str = "https://cdn.jsdelivr.net/npm";

/// (name, npm package, version, file inside the package, local path, kind)
#[rustfmt::skip]
const ENTRIES: &[(&str, &str, &str, &str, &str, AssetKind)] = &[
    ("glightbox-js", "glightbox", "3.3.0", "dist/js/glightbox.min.js", "glightbox/glightbox.min.js", AssetKind::Js),
    ("glightbox-css", "glightbox", "3.3.0", "dist/css/glightbox.min.css", "glightbox/glightbox.min.css", AssetKind::Css),
    ("mermaid-js", "mermaid", "10.9.1", "dist/mermaid.min.js", "mermaid/mermaid.min.js", AssetKind::Js),
    ("katex-js", "katex", "0.16.9", "dist/katex.min.js", "katex/katex.min.js", AssetKind::Js),
    ("katex-css", "katex", "0.16.9", "dist/katex.min.css", "katex/katex.min.css", AssetKind::Css),
    ("katex-auto-render-js", "katex", "0.16.9", "dist/contrib/auto-render.min.js", "katex/contrib/auto-render.min.js", AssetKind::Js),
    ("alpinejs-js", "alpinejs", "3.13.5", "dist/cdn.min.js", "alpinejs/alpine.min.js", AssetKind::Js),
    ("lunr-js", "lunr", "2.3.9", "lunr.min.js", "lunr/lunr.min.js", AssetKind::Js),
    ("highlightjs-js", "@highlightjs/cdn-assets", "11.9.0", "highlight.min.js", "highlightjs/highlight.min.js", AssetKind::Js),
    ("highlightjs-css", "@highlightjs/cdn-assets", "11.9.0", "styles/github.min.css", "highlightjs/github.min.css", AssetKind::Css),
];

pub(super) fn assets() -> Vec<AssetDescriptor> {
    ENTRIES
        .iter()
        .map(|&(name, package, version, file, local_path, kind)| {
            let source_url = format!("{JSDELIVR}/{package}@{version}/{file}");
            AssetDescriptor::new(name, source_url, local_path)
                .with_version(version)
                .with_kind(kind)
        })
        .collect()
}
