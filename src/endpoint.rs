use std::fmt::Display;

/// Identifies one API call by HTTP method and path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: String,
    path: Vec<String>,
}

impl Endpoint {
    pub fn new<M: Into<String>, S: Into<String>, I: IntoIterator<Item = S>>(
        method: M,
        path: I,
    ) -> Self {
        Self {
            method: method.into(),
            path: path.into_iter().map(|segment| segment.into()).collect(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The full request URL for a base host.
    pub fn url<S: AsRef<str>>(&self, host: S) -> String {
        format!("{}/{}", host.as_ref().trim_end_matches('/'), self.path.join("/"))
    }

    /// The snapshot file name for this endpoint, e.g. `GET.users.profile.json`.
    pub fn filename(&self) -> String {
        let dot_path = self.path.join(".");
        format!("{}.{}.json", self.method, dot_path.trim_end_matches('/'))
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} /{}", self.method, self.path.join("/"))
    }
}
