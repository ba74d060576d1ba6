//! Default rule sets: what a directory dump for an LLM usually should not
//! contain. Every entry is a plain rule token, classified like user input.

/// Build outputs, dependency trees, caches, logs and secrets.
pub const EXCLUSIONS: &[&str] = &[
    "*egg-info",
    "build",
    "bin",
    "dist",
    "node_modules",
    "(?i)cache",
    // Build artifacts and dependencies
    "target",
    "vendor",
    "out",
    "coverage",
    // Additional common directories/files
    "venv",
    "DerivedData",
    "Pods",
    "Carthage/Build",
    "coverage.out",
    // Logs and temporary files
    "logs",
    "*.log",
    "*.tmp",
    // Environment and secrets
    "secrets",
    "*.key",
    "*.pem",
];

/// Dotfiles and dot-directories, matched by name.
pub const HIDDEN: &[&str] = &[".*"];

pub const TEST_EXCLUSIONS: &[&str] = &[
    "*.test",
    "tests/*",
    "tests*",
    "test/*",
    "*.spec.ts",
    "*.spec.ts*",
    "*.test.ts",
    "*.test.ts*",
    "test_*",
];

pub const LOCK_EXCLUSIONS: &[&str] = &[
    "*.lock",
    "package-lock.json",
    "pnpm-lock.yaml",
    "go.sum",
    "bun.lockb",
    "Package.resolved",
    "gradle.lockfile",
    "packages.lock.json",
];

pub const BINARY_EXCLUSIONS: &[&str] = &[
    // Compiled and packaged
    "*.pyc", "*.pyo", "*.pyd", "*.exe", "*.dll", "*.app", "*.deb", "*.rpm", "*.dot",
    // Archives
    "*.zip", "*.tar", "*.gz", "*.bz2", "*.xz", "*.7z", "*.rar", "*.jar", "*.war", "*.ear",
    // Media
    "*.png", "*.jpg", "*.jpeg", "*.gif", "*.bmp", "*.ico", "*.svg", "*.mp3", "*.mp4", "*.avi",
    "*.mov", "*.wav", "*.pdf",
    // Databases and data
    "*.db", "*.sqlite", "*.sqlite3", "*.dat", "*.bin",
    // Editor swap files
    "*.swp", "*.swo",
    // Object code
    "*.class", "*.o", "*.so", "*.dylib", "*.node", "*.wasm", "*.zst", "*.lz",
    // Fonts
    "*.ttf", "*.otf", "*.woff", "*.woff2", "*.eot",
    // Windows build outputs
    "*.obj", "*.lib", "*.pdb", "*.ilk",
    // Installers
    "*.dmg", "*.pkg", "*.msi", "*.apk", "*.ipa",
    // Scientific formats
    "*.h5", "*.hdf5", "*.npz", "*.npy", "*.mat", "*.parquet", "*.feather", "*.arrow",
];

pub const DOC_EXTENSIONS: &[&str] = &["*.md", "*.rst", "*.mdx"];

/// Per-directory ignore files, lowest precedence first. Rules in a later file
/// override rules in an earlier one.
pub const IGNORE_FILENAMES: &[&str] = &[".gitignore", ".ignore", ".fdignore"];
