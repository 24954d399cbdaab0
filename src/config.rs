use std::path::PathBuf;
use std::time::Duration;

/// Valentinoカナダ向けサイトのシードURL
pub const DEFAULT_BASE_URL: &str = "https://www.valentino.com/en-ca";

/// メニュー項目数の上限（サイト固有の打ち切り値）
const DEFAULT_MAX_CATEGORIES: usize = 103;

const MENU_CSV_FILE: &str = "menu_items.csv";
const RAW_CSV_FILE: &str = "valentino_products.csv";
const CLEAN_CSV_FILE: &str = "valentino_data.csv";

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub menu_csv_path: PathBuf,
    pub raw_csv_path: PathBuf,
    pub clean_csv_path: PathBuf,
    pub max_categories: usize,
    pub headless: bool,
    pub debug: bool,
    pub timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        let data_dir = PathBuf::from("./data");
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            menu_csv_path: data_dir.join(MENU_CSV_FILE),
            raw_csv_path: data_dir.join(RAW_CSV_FILE),
            clean_csv_path: data_dir.join(CLEAN_CSV_FILE),
            max_categories: DEFAULT_MAX_CATEGORIES,
            headless: true,
            debug: false,
            timeout: Duration::from_secs(60),
        }
    }
}

impl ScraperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// 3つのCSVの保存先を指定ディレクトリ配下に付け替える
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.menu_csv_path = dir.join(MENU_CSV_FILE);
        self.raw_csv_path = dir.join(RAW_CSV_FILE);
        self.clean_csv_path = dir.join(CLEAN_CSV_FILE);
        self
    }

    pub fn with_max_categories(mut self, max_categories: usize) -> Self {
        self.max_categories = max_categories;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ScraperConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_categories, 103);
        assert!(config.headless);
        assert!(!config.debug);
        assert_eq!(config.menu_csv_path, PathBuf::from("./data/menu_items.csv"));
    }

    #[test]
    fn test_config_builder() {
        let config = ScraperConfig::new()
            .with_base_url("https://www.valentino.com/en-us")
            .with_data_dir("/tmp/valentino")
            .with_max_categories(10)
            .with_headless(false)
            .with_debug(true)
            .with_timeout(Duration::from_secs(120));

        assert_eq!(config.base_url, "https://www.valentino.com/en-us");
        assert_eq!(config.raw_csv_path, PathBuf::from("/tmp/valentino/valentino_products.csv"));
        assert_eq!(config.clean_csv_path, PathBuf::from("/tmp/valentino/valentino_data.csv"));
        assert_eq!(config.max_categories, 10);
        assert!(!config.headless);
        assert!(config.debug);
        assert_eq!(config.timeout, Duration::from_secs(120));
    }
}
