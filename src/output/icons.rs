//! File type icons

/// Icon for directories.
pub const DIRECTORY_ICON: &str = "📁";

/// Icon for files whose extension has no entry in the table.
pub const DEFAULT_ICON: &str = "📄";

/// An icon and the extensions shown with it.
#[derive(Debug)]
pub struct IconGroup {
    pub icon: &'static str,
    pub label: &'static str,
    pub extensions: &'static [&'static str],
}

const fn group(
    icon: &'static str,
    label: &'static str,
    extensions: &'static [&'static str],
) -> IconGroup {
    IconGroup {
        icon,
        label,
        extensions,
    }
}

/// Icon table in legend order.
pub const ICON_GROUPS: &[IconGroup] = &[
    group("🐍", "Python", &[".py"]),
    group("📜", "Script or log", &[".js", ".log"]),
    group("🌐", "HTML", &[".html"]),
    group("🎨", "CSS", &[".css"]),
    group("📋", "JSON", &[".json"]),
    group("📝", "Markdown", &[".md"]),
    group("📄", "Text", &[".txt"]),
    group("📑", "PDF", &[".pdf"]),
    group("🖼️", "Image", &[".jpg", ".jpeg", ".png", ".gif", ".svg"]),
    group("🎵", "Audio", &[".mp3"]),
    group("🎬", "Video", &[".mp4"]),
    group("📦", "Archive", &[".zip", ".tar", ".gz", ".rar", ".7z"]),
    group("📃", "Document", &[".doc", ".docx"]),
    group("📊", "Spreadsheet", &[".xls", ".xlsx"]),
    group("📽️", "Presentation", &[".ppt", ".pptx"]),
    group(
        "⚙️",
        "Script, executable or configuration",
        &[".sh", ".bat", ".exe", ".ini", ".cfg", ".conf"],
    ),
    group("🔌", "Library", &[".dll", ".so"]),
    group("📚", "C/C++ source", &[".h", ".c", ".cpp"]),
    group("☕", "Java", &[".java", ".class"]),
    group("💎", "Ruby", &[".rb"]),
    group("🐘", "PHP", &[".php"]),
    group("🗄️", "Database", &[".sql", ".db"]),
    group("📰", "Markup or data", &[".xml", ".yml", ".yaml", ".toml"]),
];

/// Index into `ICON_GROUPS` for an extension, if it has an icon.
pub fn group_index(extension: Option<&str>) -> Option<usize> {
    let ext = extension?;
    ICON_GROUPS.iter().position(|g| g.extensions.contains(&ext))
}

/// Icon for a file with the given lower-cased, dotted extension.
pub fn icon_for(extension: Option<&str>) -> &'static str {
    group_index(extension)
        .map(|i| ICON_GROUPS[i].icon)
        .unwrap_or(DEFAULT_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(icon_for(Some(".py")), "🐍");
        assert_eq!(icon_for(Some(".rs")), DEFAULT_ICON);
        assert_eq!(icon_for(Some(".png")), "🖼️");
        assert_eq!(icon_for(None), DEFAULT_ICON);
    }

    #[test]
    fn test_extensions_are_unique_across_groups() {
        let mut seen = std::collections::HashSet::new();
        for g in ICON_GROUPS {
            for ext in g.extensions {
                assert!(seen.insert(*ext), "duplicate extension {}", ext);
                assert!(ext.starts_with('.'));
                assert_eq!(*ext, ext.to_lowercase());
            }
        }
    }
}
