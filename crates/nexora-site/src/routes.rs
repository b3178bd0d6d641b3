//! Route table: static paths to pages, with a not-found catch-all.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::seo::PageMeta;

/// Detail pages under `/services/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceSlug {
    WebVapt,
    MobileVapt,
    NetworkAudit,
    WebAppDevelopment,
    SecureDevelopment,
    SocMonitoring,
    Training,
    IncidentResponse,
    EndpointSecurity,
}

impl ServiceSlug {
    pub const ALL: [ServiceSlug; 9] = [
        ServiceSlug::WebVapt,
        ServiceSlug::MobileVapt,
        ServiceSlug::NetworkAudit,
        ServiceSlug::WebAppDevelopment,
        ServiceSlug::SecureDevelopment,
        ServiceSlug::SocMonitoring,
        ServiceSlug::Training,
        ServiceSlug::IncidentResponse,
        ServiceSlug::EndpointSecurity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceSlug::WebVapt => "web-vapt",
            ServiceSlug::MobileVapt => "mobile-vapt",
            ServiceSlug::NetworkAudit => "network-audit",
            ServiceSlug::WebAppDevelopment => "web-app-development",
            ServiceSlug::SecureDevelopment => "secure-development",
            ServiceSlug::SocMonitoring => "soc-monitoring",
            ServiceSlug::Training => "training",
            ServiceSlug::IncidentResponse => "incident-response",
            ServiceSlug::EndpointSecurity => "endpoint-security",
        }
    }

    pub fn from_slug(slug: &str) -> Option<ServiceSlug> {
        Self::ALL.into_iter().find(|s| s.as_str() == slug)
    }

    /// Name shown in navigation.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceSlug::WebVapt => "Web Application VAPT",
            ServiceSlug::MobileVapt => "Mobile Application VAPT",
            ServiceSlug::NetworkAudit => "Network Security Audit",
            ServiceSlug::WebAppDevelopment => "Web & App Development",
            ServiceSlug::SecureDevelopment => "Secure Development",
            ServiceSlug::SocMonitoring => "SOC & Threat Monitoring",
            ServiceSlug::Training => "Cyber Awareness Training",
            ServiceSlug::IncidentResponse => "Incident Response",
            ServiceSlug::EndpointSecurity => "Endpoint Security & Ransomware Defense",
        }
    }
}

/// A resolved page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    About,
    Services,
    Service(ServiceSlug),
    CaseStudies,
    Contact,
    Privacy,
    Terms,
    /// Anything else; carries the path as requested.
    NotFound(String),
}

impl Route {
    /// Resolve a request path. Query strings, fragments, trailing slashes and
    /// letter case are ignored. Never fails: unknown paths become `NotFound`.
    pub fn resolve(path: &str) -> Route {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let normalized = trimmed.trim_end_matches('/').to_ascii_lowercase();

        let route = match normalized.as_str() {
            "" => Route::Home,
            "/about" => Route::About,
            "/services" => Route::Services,
            "/case-studies" => Route::CaseStudies,
            "/contact" => Route::Contact,
            "/privacy" => Route::Privacy,
            "/terms" => Route::Terms,
            other => other
                .strip_prefix("/services/")
                .and_then(ServiceSlug::from_slug)
                .map(Route::Service)
                .unwrap_or_else(|| Route::NotFound(path.to_string())),
        };

        if let Route::NotFound(requested) = &route {
            warn!(path = %requested, "404: no route for requested path");
        }
        route
    }

    /// Canonical path of the page.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Services => "/services".to_string(),
            Route::Service(slug) => format!("/services/{}", slug.as_str()),
            Route::CaseStudies => "/case-studies".to_string(),
            Route::Contact => "/contact".to_string(),
            Route::Privacy => "/privacy".to_string(),
            Route::Terms => "/terms".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Route::NotFound(_))
    }

    /// SEO metadata of the page.
    pub fn meta(&self) -> PageMeta {
        crate::seo::page_meta(self)
    }
}

/// A navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

impl NavLink {
    fn new(label: &'static str, route: Route) -> Self {
        Self { label, route }
    }
}

fn service_links(slugs: &[ServiceSlug]) -> Vec<NavLink> {
    slugs
        .iter()
        .map(|&slug| NavLink::new(slug.label(), Route::Service(slug)))
        .collect()
}

/// Top-level navbar entries, in display order.
pub fn navbar() -> Vec<NavLink> {
    vec![
        NavLink::new("Home", Route::Home),
        NavLink::new("About", Route::About),
        NavLink::new("Services", Route::Services),
        NavLink::new("Case Studies", Route::CaseStudies),
        NavLink::new("Contact", Route::Contact),
    ]
}

/// The navbar's services dropdown.
pub fn services_menu() -> Vec<NavLink> {
    service_links(&[
        ServiceSlug::WebAppDevelopment,
        ServiceSlug::SecureDevelopment,
        ServiceSlug::WebVapt,
        ServiceSlug::MobileVapt,
        ServiceSlug::NetworkAudit,
        ServiceSlug::SocMonitoring,
        ServiceSlug::IncidentResponse,
        ServiceSlug::Training,
        ServiceSlug::EndpointSecurity,
    ])
}

/// Footer "Services" column.
pub fn footer_services() -> Vec<NavLink> {
    service_links(&[
        ServiceSlug::WebVapt,
        ServiceSlug::MobileVapt,
        ServiceSlug::NetworkAudit,
        ServiceSlug::SocMonitoring,
    ])
}

/// Footer "Quick Links" column.
pub fn footer_quick_links() -> Vec<NavLink> {
    vec![
        NavLink::new("Home", Route::Home),
        NavLink::new("About Us", Route::About),
        NavLink::new("Case Studies", Route::CaseStudies),
        NavLink::new("Contact", Route::Contact),
    ]
}

/// Footer legal links.
pub fn legal_links() -> Vec<NavLink> {
    vec![
        NavLink::new("Privacy Policy", Route::Privacy),
        NavLink::new("Terms & Conditions", Route::Terms),
    ]
}
