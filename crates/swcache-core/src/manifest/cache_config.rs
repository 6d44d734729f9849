//! Rendering of the browser cache config script.

use super::model::Manifest;
use crate::errors::Result;

/// Strict-mode preamble that opens every cache config script
pub const STRICT_PREAMBLE: &str = "'use strict';\n";

/// Default name of the variable holding the manifest
pub const DEFAULT_CONFIG_VAR: &str = "BrowserCacheConfig";

/// Render `'use strict';\nvar <var_name> = <manifest json>;`.
pub fn render_cache_config(manifest: &Manifest, var_name: &str) -> Result<String> {
    let json = manifest.to_json()?;
    Ok(format!("{STRICT_PREAMBLE}var {var_name} = {json};"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::model::ManifestEntry;

    #[test]
    fn test_render_default_var() {
        let manifest = Manifest::new(vec![
            ManifestEntry::new("index.h1.html", "h1"),
            ManifestEntry::new("app.h2.js", "h2"),
        ]);

        let rendered = render_cache_config(&manifest, DEFAULT_CONFIG_VAR).unwrap();

        assert_eq!(
            rendered,
            "'use strict';\nvar BrowserCacheConfig = [[\"index.h1.html\",\"h1\"],[\"app.h2.js\",\"h2\"]];"
        );
    }

    #[test]
    fn test_render_empty_manifest() {
        let rendered = render_cache_config(&Manifest::default(), "Cfg").unwrap();
        assert_eq!(rendered, "'use strict';\nvar Cfg = [];");
    }
}
