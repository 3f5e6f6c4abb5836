use url::Url;

/// Sanitize filename to remove invalid characters
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .trim_matches('.')
        .to_string()
}

/// Build `{base}{prefix}/{path}`, keeping any path already on `base` and
/// tolerating stray slashes on either side.
pub fn join_endpoint(base: &Url, prefix: &str, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }

    let prefix = prefix.trim_matches('/');
    let path = path.trim_start_matches('/');
    let relative = if prefix.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", prefix, path)
    };
    base.join(&relative)
}
