pub const DEFAULT_PROVIDER_ID: &str = "gemini";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_MAX_LOOPS: usize = 3;
pub const DEFAULT_DOCUMENTS_DIR: &str = "extracted_files";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

pub const DEFAULT_EXTRACTION_SYSTEM_PROMPT: &str = "You are a meticulous research assistant that \
reads scientific papers and extracts their content faithfully. Never invent information that is \
not present in the document; leave a field empty when the paper does not provide it.";

pub const DEFAULT_EXTRACTION_USER_PROMPT: &str = "Read the attached paper and fill in the \
requested structure. Return exactly one record.";
