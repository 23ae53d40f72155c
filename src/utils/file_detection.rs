use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Display category of a listing entry, used by the UI to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Folder,
    /// Generic file; anything without a registered extension.
    File,
    Model3d,
    Archive,
    Data,
    DiskImage,
    Document,
    Executable,
    Image,
    Markup,
    Multimedia,
    Office,
    PlainText,
    Source,
    RuntimeModule,
    Shortcut,
}

/// Category → extensions. Extensions are stored lower-case with the leading dot.
const CATEGORY_TABLE: &[(FileCategory, &[&str])] = &[
    (
        FileCategory::Model3d,
        &[
            ".stl", ".ply", ".wrl", ".fbx", ".3mf", ".glb", ".3dm", ".stp", ".step", ".igs",
            ".iges", ".3ds", ".blend",
        ],
    ),
    (
        FileCategory::Archive,
        &[
            ".zip", ".tar", ".gz", ".tgz", ".bz2", ".tbz", ".lzh", ".7z", ".rar", ".msi",
        ],
    ),
    (
        FileCategory::Data,
        &[
            ".csv", ".xml", ".json", ".db", ".db3", ".sqlite", ".sqlite3", ".sqlitedb", ".mdb",
            ".dat",
        ],
    ),
    (FileCategory::DiskImage, &[".iso", ".img", ".vmdk", ".vhd"]),
    (FileCategory::Document, &[".pdf", ".xps", ".ps", ".dvi"]),
    (FileCategory::Executable, &[".exe", ".bat", ".js", ".vbs", ".sh"]),
    (
        FileCategory::Image,
        &[
            ".bmp", ".png", ".jpg", ".jfif", ".jpeg", ".tif", ".tiff", ".gif", ".dicom", ".xbm",
            ".xpm", ".ppm", ".pgm", ".pbm", ".ico", ".svg", ".vml", ".wmf", ".emf", ".eps",
            ".psd", ".ai", ".hdr", ".exr", ".rgbe",
        ],
    ),
    (FileCategory::Markup, &[".htm", ".html", ".shtml", ".md", ".rtf"]),
    (
        FileCategory::Multimedia,
        &[
            ".wav", ".mid", ".midi", ".mp3", ".flac", ".mpg", ".mpeg", ".mp4", ".wmv", ".wma",
            ".3gp",
        ],
    ),
    (
        FileCategory::Office,
        &[
            ".xls", ".xlsx", ".xlsm", ".ppt", ".pptx", ".pptm", ".doc", ".docx", ".docm", ".ods",
            ".odp", ".odt",
        ],
    ),
    (FileCategory::PlainText, &[".txt", ".text"]),
    (
        FileCategory::Source,
        &[
            ".c", ".cc", ".cpp", ".cxx", ".cs", ".go", ".h", ".hpp", ".hxx", ".vb", ".java",
            ".tex", ".tcl", ".pl", ".py", ".rs", ".rb", ".asp", ".aspx", ".php", ".lua",
        ],
    ),
    (FileCategory::RuntimeModule, &[".dll", ".so", ".class", ".sys"]),
    (FileCategory::Shortcut, &[".lnk"]),
];

/// Maps file extensions to display categories.
///
/// Built once from [`CATEGORY_TABLE`] and read-only afterwards; use
/// [`FileTypeClassifier::global`] instead of rebuilding it.
#[derive(Debug)]
pub struct FileTypeClassifier {
    by_extension: HashMap<String, FileCategory>,
}

impl FileTypeClassifier {
    fn build() -> Self {
        let mut by_extension = HashMap::new();
        for (category, extensions) in CATEGORY_TABLE {
            for ext in *extensions {
                by_extension.insert(ext.to_string(), *category);
            }
        }
        Self { by_extension }
    }

    /// The process-wide classifier.
    pub fn global() -> &'static Self {
        static CLASSIFIER: OnceLock<FileTypeClassifier> = OnceLock::new();
        CLASSIFIER.get_or_init(Self::build)
    }

    /// Classifies an extension such as `".PNG"`. Matching is exact and
    /// case-insensitive; unknown or empty extensions are [`FileCategory::File`].
    pub fn classify(&self, extension: &str) -> FileCategory {
        if extension.is_empty() {
            return FileCategory::File;
        }
        self.by_extension
            .get(&extension.to_lowercase())
            .copied()
            .unwrap_or(FileCategory::File)
    }

    /// Classifies a file by the extension of its name.
    pub fn classify_path(&self, path: &Path) -> FileCategory {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.classify(&format!(".{ext}")),
            None => FileCategory::File,
        }
    }
}
