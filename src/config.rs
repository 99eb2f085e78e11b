use clap::Parser;

#[derive(Parser, Clone)]
pub struct Config {
    #[clap(env, long, default_value = "development")]
    pub environment: String,

    /// Comma separated list of allowed CORS origins.
    #[clap(env, long, default_value = "http://localhost:3000")]
    pub origin_urls: String,

    #[clap(env, long, default_value_t = 3000)]
    pub port: u16,

    #[clap(env, long, hide_env_values = true)]
    pub google_maps_api_key: String,

    #[clap(env, long, default_value = "https://maps.googleapis.com/maps/api/place")]
    pub places_base_url: String,

    #[clap(env, long, default_value = "zh-TW")]
    pub places_language: String,

    /// Nearby-search calls allowed in flight per area search.
    #[clap(env, long, default_value_t = 4)]
    pub cell_concurrency: usize,

    /// Detail enrichments allowed in flight per area search.
    #[clap(env, long, default_value_t = 4)]
    pub detail_concurrency: usize,

    #[clap(env, long, default_value_t = 32)]
    pub max_concurrent_searches: usize,

    #[clap(env, long, default_value_t = 60)]
    pub search_timeout_secs: u64,

    #[clap(env, long, default_value_t = 10)]
    pub http_timeout_secs: u64,

    #[clap(env, long, default_value_t = 3600)]
    pub cache_cleanup_interval_secs: u64,
}
