//! Per-page SEO metadata and the head tags it renders to.

use serde::{Deserialize, Serialize};

use crate::routes::{Route, ServiceSlug};

pub const SITE_URL: &str = "https://www.cybernexora.com";
pub const TITLE_SUFFIX: &str = " | CyberNexora - Leading Cybersecurity Company in Gujarat";
pub const DEFAULT_CANONICAL: &str = "https://www.cybernexora.com/";
pub const DEFAULT_OG_IMAGE: &str = "https://www.cybernexora.com/og-image.jpg";
pub const DEFAULT_KEYWORDS: &str = "CyberNexora, Cybersecurity Services, Cyber Company in Gujarat, \
Cybersecurity in Surat, Best Cyber Company in India, Cyber Defense Solutions, \
Cybersecurity Provider, Digital Protection Services, Network Security Experts";

/// Metadata of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    /// Page-specific keywords, placed before the defaults.
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub canonical: Option<String>,
    #[serde(default)]
    pub og_image: Option<String>,
}

/// Attribute a `<meta>` tag is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaKey {
    Name,
    Property,
}

/// One element for the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadTag {
    Title(String),
    Meta {
        key: MetaKey,
        name: String,
        content: String,
    },
    Link {
        rel: String,
        href: String,
    },
}

impl PageMeta {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_canonical(mut self, canonical: impl Into<String>) -> Self {
        self.canonical = Some(canonical.into());
        self
    }

    pub fn full_title(&self) -> String {
        format!("{}{}", self.title, TITLE_SUFFIX)
    }

    /// Page keywords followed by the site-wide defaults.
    pub fn keywords(&self) -> String {
        match self.keywords.as_deref().map(str::trim) {
            Some(keywords) if !keywords.is_empty() => format!("{keywords}, {DEFAULT_KEYWORDS}"),
            _ => DEFAULT_KEYWORDS.to_string(),
        }
    }

    pub fn canonical_url(&self) -> &str {
        self.canonical.as_deref().unwrap_or(DEFAULT_CANONICAL)
    }

    pub fn image_url(&self) -> &str {
        self.og_image.as_deref().unwrap_or(DEFAULT_OG_IMAGE)
    }

    /// Title, description, keywords, canonical link, Open Graph and Twitter card tags.
    pub fn head_tags(&self) -> Vec<HeadTag> {
        let title = self.full_title();
        let canonical = self.canonical_url().to_string();
        let image = self.image_url().to_string();
        let meta = |key, name: &str, content: &str| HeadTag::Meta {
            key,
            name: name.to_string(),
            content: content.to_string(),
        };

        vec![
            HeadTag::Title(title.clone()),
            meta(MetaKey::Name, "description", &self.description),
            meta(MetaKey::Name, "keywords", &self.keywords()),
            HeadTag::Link {
                rel: "canonical".to_string(),
                href: canonical.clone(),
            },
            meta(MetaKey::Property, "og:type", "website"),
            meta(MetaKey::Property, "og:url", &canonical),
            meta(MetaKey::Property, "og:title", &title),
            meta(MetaKey::Property, "og:description", &self.description),
            meta(MetaKey::Property, "og:image", &image),
            meta(MetaKey::Name, "twitter:card", "summary_large_image"),
            meta(MetaKey::Name, "twitter:url", &canonical),
            meta(MetaKey::Name, "twitter:title", &title),
            meta(MetaKey::Name, "twitter:description", &self.description),
            meta(MetaKey::Name, "twitter:image", &image),
        ]
    }
}

impl HeadTag {
    /// HTML markup of the tag, attribute values escaped.
    pub fn to_html(&self) -> String {
        match self {
            HeadTag::Title(title) => format!("<title>{}</title>", escape(title)),
            HeadTag::Meta { key, name, content } => {
                let attr = match key {
                    MetaKey::Name => "name",
                    MetaKey::Property => "property",
                };
                format!(
                    r#"<meta {attr}="{}" content="{}" />"#,
                    escape(name),
                    escape(content)
                )
            }
            HeadTag::Link { rel, href } => {
                format!(r#"<link rel="{}" href="{}" />"#, escape(rel), escape(href))
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn canonical_for(route: &Route) -> String {
    format!("{SITE_URL}{}", route.path())
}

/// Metadata for every page of the site.
pub(crate) fn page_meta(route: &Route) -> PageMeta {
    let meta = match route {
        Route::Home => PageMeta::new(
            "Home",
            "CyberNexora delivers VAPT, SOC monitoring, incident response and secure \
             development services to businesses across Gujarat and India.",
        ),
        Route::About => PageMeta::new(
            "About Us",
            "Learn about CyberNexora, Gujarat's leading cybersecurity company. We are trusted \
             cyber defense experts in Surat providing comprehensive security solutions to \
             businesses across India.",
        ),
        Route::Services => PageMeta::new(
            "Cybersecurity Services",
            "Comprehensive cybersecurity services including VAPT, penetration testing, network \
             security audits, SOC monitoring, and incident response.",
        ),
        Route::Service(slug) => service_meta(*slug),
        Route::CaseStudies => PageMeta::new(
            "Case Studies",
            "Explore CyberNexora's successful cybersecurity case studies. See how we've helped \
             businesses across India strengthen their security posture.",
        ),
        Route::Contact => PageMeta::new(
            "Contact Us",
            "Get in touch with CyberNexora, the leading cybersecurity company in Surat, Gujarat.",
        ),
        Route::Privacy => PageMeta::new(
            "Privacy Policy",
            "Read CyberNexora's privacy policy. Learn how we collect, use, and protect your data.",
        ),
        Route::Terms => PageMeta::new(
            "Terms & Conditions",
            "Review CyberNexora's terms and conditions governing our cybersecurity services.",
        ),
        Route::NotFound(_) => {
            return PageMeta::new("Page Not Found", "The page you are looking for does not exist.")
        }
    };
    meta.with_canonical(canonical_for(route))
}

fn service_meta(slug: ServiceSlug) -> PageMeta {
    let (title, description, keywords) = match slug {
        ServiceSlug::WebVapt => (
            "Web Application VAPT Services",
            "Web application vulnerability assessment and penetration testing against the \
             OWASP Top 10.",
            "Web Application VAPT, Penetration Testing, OWASP Testing, Web Security, \
             Application Security Testing",
        ),
        ServiceSlug::MobileVapt => (
            "Mobile Application VAPT Services",
            "Expert mobile app security testing for iOS and Android.",
            "Mobile VAPT, Mobile App Security, iOS Security Testing, Android Security Testing",
        ),
        ServiceSlug::NetworkAudit => (
            "Network Security Audit Services",
            "Comprehensive network security audits to identify vulnerabilities and strengthen \
             your infrastructure.",
            "Network Security Audit, Network Penetration Testing, Infrastructure Security",
        ),
        ServiceSlug::WebAppDevelopment => (
            "Web & App Development",
            "Custom website, application and e-commerce development built with security first.",
            "Web Development, App Development, E-commerce Development",
        ),
        ServiceSlug::SecureDevelopment => (
            "Secure Development & Consulting",
            "Threat modeling, secure coding and security reviews across the development lifecycle.",
            "Secure Development, Threat Modeling, Secure Coding, Security Consulting",
        ),
        ServiceSlug::SocMonitoring => (
            "SOC & Threat Monitoring",
            "Managed SOC and SIEM with continuous monitoring and threat detection.",
            "SOC Monitoring, Managed SOC, SIEM, Threat Detection",
        ),
        ServiceSlug::Training => (
            "Cyber Awareness Training",
            "Phishing awareness and security best-practice training for your team.",
            "Cyber Awareness Training, Phishing Simulation, Security Training",
        ),
        ServiceSlug::IncidentResponse => (
            "Incident Response Services",
            "24/7 emergency incident handling and forensic analysis.",
            "Incident Response, Digital Forensics, Breach Response",
        ),
        ServiceSlug::EndpointSecurity => (
            "Endpoint Security & Ransomware Defense",
            "Advanced threat protection and ransomware defense for every endpoint.",
            "Endpoint Security, Ransomware Defense, EDR, Advanced Threat Protection",
        ),
    };
    PageMeta::new(title, description).with_keywords(keywords)
}
