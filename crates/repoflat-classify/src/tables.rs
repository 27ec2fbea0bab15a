//! Static classification tables. Data only: traversal logic never changes
//! when a new extension or filename is added here.

/// Extensionless filenames recognized as text.
pub(crate) static WELL_KNOWN_FILENAMES: &[&str] = &[
    // Docker and container files
    "Dockerfile",
    "dockerfile",
    "Containerfile",
    "containerfile",
    // Build and package files
    "Makefile",
    "makefile",
    "Rakefile",
    "rakefile",
    "Gemfile",
    "gemfile",
    "Podfile",
    "podfile",
    "CMakeLists.txt",
    // Configuration files
    ".env",
    ".gitignore",
    ".dockerignore",
    ".editorconfig",
    ".npmrc",
    ".eslintrc",
    ".prettierrc",
    ".babelrc",
    ".gitconfig",
    ".gitattributes",
    ".hgrc",
    ".bzrignore",
    "requirements.txt",
    "package.json",
    "composer.json",
    "config",
    "configure",
    // Autoconf inputs
    "configure.ac",
    "configure.in",
    // Editor files
    ".vimrc",
    ".gvimrc",
    ".ideavimrc",
    // Documentation
    "README",
    "LICENSE",
    "LICENCE",
    "CONTRIBUTING",
    "CHANGELOG",
    "AUTHORS",
    "PATENTS",
    "NOTICE",
    // Web server control files
    ".htaccess",
    ".htpasswd",
];

/// File extensions (lowercased, without the dot) recognized as text.
pub(crate) static TEXT_EXTENSIONS: &[&str] = &[
    // Programming languages
    "py", "js", "ts", "jsx", "tsx", "vue", "rb", "php", "java", "go", "rs", "c", "cpp", "h",
    "hpp", "cs", "swift", "kt", "scala", "html", "css", "scss", "less", "md", "txt", "sh", "bash",
    "zsh", "json", "yaml", "yml", "xml", "sql", "graphql", "r", "m", "f", "f90", "jl", "lua",
    "pl", "pm", "t", "ps1", "bat", "asm", "s", "nim", "ex", "exs", "clj", "lisp", "hs", "erl",
    "elm", "toml",
    // Web development
    "svelte", "astro", "liquid", "pug", "jade", "haml", "slim", "sass", "styl", "coffee", "mjs",
    "cjs", "ejs", "hbs",
    // Configuration
    "ini", "cfg", "conf", "config", "env", "properties", "gitignore", "dockerignore",
    "editorconfig", "npmrc", "eslintrc", "prettierrc", "babelrc",
    // Documentation
    "rst", "adoc", "asciidoc", "tex", "markdown", "rdoc", "wiki", "dokuwiki", "mediawiki",
    "creole", "mdc",
    // Data formats
    "csv", "tsv", "jsonl", "proto", "avsc", "thrift", "graphqls", "prisma", "dhall",
    // Shells and scripts
    "fish", "csh", "ksh", "tcsh", "pwsh", "cmd", "vbs", "applescript", "nu", "action",
    // Templates
    "tmpl", "tpl", "j2", "jinja", "jinja2", "mustache", "handlebars", "njk", "nunjucks",
    // Build and package files
    "make", "makefile", "dockerfile", "containerfile", "vagrantfile", "rakefile", "gemfile",
    "podfile", "cmake", "cabal", "gradle",
    // Editor and VCS dotfile suffixes
    "vim", "nvim", "vimrc", "gvimrc", "ideavimrc", "gitconfig", "gitattributes", "hgrc",
    "bzrignore",
    // Keys and certificates (PEM-style text)
    "pem", "crt", "key", "pub", "gpg", "asc",
    // Misc text
    "log", "diff", "patch", "po", "pot", "msg", "lst", "text", "rtf", "man", "me", "ms",
];
