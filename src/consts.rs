use std::time::Duration;

pub const SEARCH_URL: &str = "https://www.instagram.com/web/search/topsearch/";
pub const GRAPHQL_URL: &str = "https://www.instagram.com/graphql/query/";

/// Persisted query selecting a user's followers.
pub const FOLLOWERS_QUERY_HASH: &str = "c76146de99bb02f6415203be841dd25a";
/// Persisted query selecting the accounts a user follows.
pub const FOLLOWINGS_QUERY_HASH: &str = "d04b0a864b4b54837c0d870b0e77e076";

pub const FOLLOWERS_EDGE_PATH: &[&str] = &["data", "user", "edge_followed_by"];
pub const FOLLOWINGS_EDGE_PATH: &[&str] = &["data", "user", "edge_follow"];

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(300);

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_REFERER: &str = "https://www.instagram.com/";

/// Cookies every session file must supply.
pub const REQUIRED_COOKIES: &[&str] = &["csrftoken", "ds_user_id", "sessionid"];

/// Output root; reports land in `OUTPUT_ROOT/<username>/`.
pub const OUTPUT_ROOT: &str = "out";
