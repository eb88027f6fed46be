//! Built-in vocabulary tables. Used when no `VOCABULARY_PATH` is configured.

/// Raw surface form → canonical skill token.
pub const ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("html5", "html"),
    ("css3", "css"),
    ("py", "python"),
    ("reactjs", "react"),
    ("nodejs", "node"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("postgres", "postgresql"),
    ("tailwindcss", "tailwind"),
    ("expressjs", "express"),
    ("next", "nextjs"),
    ("sklearn", "scikit-learn"),
    ("deeplearning", "deep learning"),
    ("sql server", "sql"),
    ("ms sql", "sql"),
    ("google cloud", "gcp"),
    ("docker-compose", "docker"),
];

/// Interchangeable skills. Stored directed here; symmetrised at load.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("tensorflow", &["keras", "pytorch"]),
    ("pytorch", &["keras", "tensorflow"]),
    ("keras", &["tensorflow", "pytorch"]),
    ("sql", &["mysql", "postgresql", "sql server", "ms sql"]),
    ("git", &["github", "bitbucket"]),
    ("flask", &["django"]),
    ("django", &["flask"]),
    ("aws", &["azure", "gcp"]),
    ("machine learning", &["deep learning"]),
    ("data analysis", &["data analytics", "analytics"]),
];

pub const KNOWN_SKILLS: &[&str] = &[
    "html",
    "css",
    "javascript",
    "react",
    "vue",
    "angular",
    "typescript",
    "node",
    "express",
    "django",
    "flask",
    "spring",
    "java",
    "python",
    "c++",
    "c",
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "firebase",
    "aws",
    "azure",
    "docker",
    "kubernetes",
    "git",
    "github",
    "bitbucket",
    "jira",
    "rest",
    "graphql",
    "redux",
    "nextjs",
    "tailwind",
    "bootstrap",
    "pandas",
    "numpy",
    "matplotlib",
    "seaborn",
    "scikit-learn",
    "tensorflow",
    "keras",
    "pytorch",
    "nlp",
    "opencv",
    "data analysis",
    "machine learning",
    "deep learning",
    "linux",
    "bash",
    "shell scripting",
    "android",
    "kotlin",
    "swift",
    "firebase auth",
    "firebase firestore",
];

/// Skills weighted above the default when scoring a match.
pub const CORE_SKILLS: &[&str] = &[
    "python",
    "sql",
    "javascript",
    "react",
    "node",
    "aws",
    "docker",
    "django",
    "machine learning",
    "data analysis",
];

pub const CORE_SKILL_WEIGHT: f64 = 2.0;
pub const DEFAULT_WEIGHT: f64 = 1.0;
