//! Mime type icon lookup in freedesktop icon themes.

use std::path::{Path, PathBuf};

use docseek_types::IconSpec;

const ICON_SIZES: [u32; 9] = [32, 36, 48, 64, 72, 96, 128, 192, 256];
const ICON_EXTENSIONS: [&str; 3] = ["png", "svg", "xpm"];

/// Icon name used when a mime type has no icon of its own.
pub const GENERIC_MIME_ICON: &str = "text-plain";

/// Resolves mime types to icon files inside a list of theme roots.
#[derive(Debug, Clone, Default)]
pub struct MimeIconResolver {
    themes: Vec<PathBuf>,
    fallback: IconSpec,
}

impl MimeIconResolver {
    #[must_use]
    pub fn new(themes: Vec<PathBuf>) -> Self {
        Self {
            themes,
            fallback: IconSpec::default(),
        }
    }

    /// Icon used when nothing in the themes matches.
    #[must_use]
    pub fn with_fallback(mut self, fallback: IconSpec) -> Self {
        self.fallback = fallback;
        self
    }

    /// Find an icon file for a mime type such as `application/pdf`.
    ///
    /// Per theme, sized directories are tried smallest first, in both the
    /// `{size}x{size}/mimetypes` and `mimetypes/{size}` layouts, before the
    /// unsized `mimetypes` directory.
    #[must_use]
    pub fn resolve(&self, mime_type: &str) -> Option<PathBuf> {
        let icon_name = mime_type.replace('/', "-");
        self.themes
            .iter()
            .find_map(|theme| find_in_theme(theme, &icon_name))
    }

    /// Icon for a result, falling back to the generic text icon and then to
    /// the plugin icon.
    #[must_use]
    pub fn icon_for(&self, mime_type: Option<&str>) -> IconSpec {
        let Some(mime_type) = mime_type.filter(|m| !m.is_empty()) else {
            return self.fallback.clone();
        };

        self.resolve(mime_type)
            .or_else(|| self.resolve(GENERIC_MIME_ICON))
            .map_or_else(|| self.fallback.clone(), IconSpec::Path)
    }
}

fn find_in_theme(theme: &Path, icon_name: &str) -> Option<PathBuf> {
    for size in ICON_SIZES {
        let sized = theme.join(format!("{size}x{size}")).join("mimetypes");
        if let Some(path) = find_with_extensions(&sized, icon_name) {
            return Some(path);
        }

        let nested = theme.join("mimetypes").join(size.to_string());
        if let Some(path) = find_with_extensions(&nested, icon_name) {
            return Some(path);
        }
    }

    find_with_extensions(&theme.join("mimetypes"), icon_name)
}

fn find_with_extensions(dir: &Path, icon_name: &str) -> Option<PathBuf> {
    ICON_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{icon_name}.{ext}")))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn finds_sized_layout_first() {
        let theme = TempDir::new().unwrap();
        let sized = theme.path().join("48x48/mimetypes/application-pdf.svg");
        let nested = theme.path().join("mimetypes/64/application-pdf.svg");
        touch(&sized);
        touch(&nested);

        let resolver = MimeIconResolver::new(vec![theme.path().to_path_buf()]);
        assert_eq!(resolver.resolve("application/pdf"), Some(sized));
    }

    #[test]
    fn smaller_size_wins_across_layouts() {
        let theme = TempDir::new().unwrap();
        let nested = theme.path().join("mimetypes/32/text-x-rust.png");
        let sized = theme.path().join("64x64/mimetypes/text-x-rust.png");
        touch(&nested);
        touch(&sized);

        let resolver = MimeIconResolver::new(vec![theme.path().to_path_buf()]);
        assert_eq!(resolver.resolve("text/x-rust"), Some(nested));
    }

    #[test]
    fn png_preferred_over_svg() {
        let theme = TempDir::new().unwrap();
        let png = theme.path().join("32x32/mimetypes/image-png.png");
        touch(&png);
        touch(&theme.path().join("32x32/mimetypes/image-png.svg"));

        let resolver = MimeIconResolver::new(vec![theme.path().to_path_buf()]);
        assert_eq!(resolver.resolve("image/png"), Some(png));
    }

    #[test]
    fn falls_back_to_unsized_directory() {
        let theme = TempDir::new().unwrap();
        let unsized_icon = theme.path().join("mimetypes/text-html.xpm");
        touch(&unsized_icon);

        let resolver = MimeIconResolver::new(vec![theme.path().to_path_buf()]);
        assert_eq!(resolver.resolve("text/html"), Some(unsized_icon));
    }

    #[test]
    fn later_theme_used_when_first_misses() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let icon = second.path().join("48x48/mimetypes/application-zip.svg");
        touch(&icon);

        let resolver = MimeIconResolver::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(resolver.resolve("application/zip"), Some(icon));
    }

    #[test]
    fn unknown_mime_uses_generic_icon() {
        let theme = TempDir::new().unwrap();
        let generic = theme.path().join("32x32/mimetypes/text-plain.svg");
        touch(&generic);

        let resolver = MimeIconResolver::new(vec![theme.path().to_path_buf()]);
        assert_eq!(
            resolver.icon_for(Some("application/x-unknown")),
            IconSpec::Path(generic)
        );
    }

    #[test]
    fn missing_mime_uses_fallback() {
        let resolver = MimeIconResolver::new(Vec::new())
            .with_fallback(IconSpec::Material("description".to_string()));
        assert_eq!(
            resolver.icon_for(None),
            IconSpec::Material("description".to_string())
        );
        assert_eq!(
            resolver.icon_for(Some("")),
            IconSpec::Material("description".to_string())
        );
    }

    #[test]
    fn nothing_found_uses_fallback() {
        let theme = TempDir::new().unwrap();
        let resolver = MimeIconResolver::new(vec![theme.path().to_path_buf()]);
        assert_eq!(resolver.icon_for(Some("application/pdf")), IconSpec::default());
    }
}
