pub trait Configuration: Clone + Send + Sync + 'static {
    fn api_base_url(&self) -> String;
}
