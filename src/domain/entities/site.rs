use chrono::{Datelike, Utc};

/// Fixed site identity injected into every template, replacing the
/// Flask context processors.
#[derive(Debug, Clone)]
pub struct SiteInfo {
    pub nome: String,
    pub titulo: String,
    pub github_username: String,
    pub github_link: String,
    pub linkedin_link: String,
    pub email_contato: String,
}

impl SiteInfo {
    pub fn new(github_username: &str) -> Self {
        SiteInfo {
            nome: "Natália Barros".to_string(),
            titulo: "Desenvolvedora Python Full Stack".to_string(),
            github_username: github_username.to_string(),
            github_link: format!("https://github.com/{}", github_username),
            linkedin_link: "https://www.linkedin.com/in/nataliachagas1994/".to_string(),
            email_contato: "natalia.goldenglowitsolutions@gmail.com".to_string(),
        }
    }

    pub fn ano_atual(&self) -> i32 {
        Utc::now().year()
    }
}
