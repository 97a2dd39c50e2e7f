// tests/common/mod.rs
//
// In-memory stand-in for the leaders API and the encyclopedia.
#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use leaders_scrape::core::net::{HttpResponse, Transport};
use leaders_scrape::credentials::Endpoints;

pub const API: &str = "http://api.test";

pub fn endpoints() -> Endpoints {
    Endpoints::new(API)
}

#[derive(Clone, Debug)]
pub struct Call {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub cookie: Option<String>,
}

#[derive(Default)]
pub struct FakeApi {
    pub countries: Vec<String>,
    /// country code → JSON body of `/leaders`
    pub leaders: HashMap<String, String>,
    /// page URL → HTML
    pub pages: HashMap<String, String>,
    /// Statuses served before the normal response, keyed by `countries`,
    /// `leaders:<code>` or the page URL.
    pub scripted: HashMap<String, VecDeque<u16>>,
    /// Statuses for upcoming `/cookie` calls (200 issues a cookie as usual);
    /// success once drained.
    pub cookie_script: VecDeque<u16>,
    pub cookie_calls: usize,
    pub calls: Vec<Call>,
}

impl FakeApi {
    pub fn new(countries: &[&str]) -> Self {
        Self { countries: countries.iter().map(|c| c.to_string()).collect(), ..Default::default() }
    }

    pub fn with_leaders(mut self, country: &str, leaders: &[(&str, &str, &str)]) -> Self {
        let items: Vec<String> = leaders.iter().map(|(id, name, url)| leader_json(id, name, url)).collect();
        self.leaders.insert(country.to_string(), format!("[{}]", items.join(",")));
        self
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn script(mut self, key: &str, statuses: &[u16]) -> Self {
        self.scripted.entry(key.to_string()).or_default().extend(statuses.iter().copied());
        self
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.calls.iter().filter(|c| c.url == url).count()
    }

    fn respond(status: u16, body: String) -> Result<HttpResponse, String> {
        Ok(HttpResponse { status, body, set_cookies: vec![] })
    }
}

impl Transport for FakeApi {
    fn get(&mut self, url: &str, query: &[(&str, &str)], cookie: Option<&str>) -> Result<HttpResponse, String> {
        if url == format!("{API}/cookie") {
            self.cookie_calls += 1;
            match self.cookie_script.pop_front() {
                Some(status) if status != 200 => return Self::respond(status, String::new()),
                _ => {}
            }
            return Ok(HttpResponse {
                status: 200,
                body: "The cookie has been created".into(),
                set_cookies: vec![format!("user_cookie=tok{}; Path=/", self.cookie_calls)],
            });
        }

        self.calls.push(Call {
            url: url.to_string(),
            query: query.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            cookie: cookie.map(str::to_string),
        });

        let country = query.iter().find(|(k, _)| *k == "country").map(|(_, v)| v.to_string());
        let key = if url == format!("{API}/countries") {
            "countries".to_string()
        } else if url == format!("{API}/leaders") {
            format!("leaders:{}", country.clone().unwrap_or_default())
        } else {
            url.to_string()
        };

        if let Some(status) = self.scripted.get_mut(&key).and_then(VecDeque::pop_front) {
            return Self::respond(status, r#"{"message":"scripted"}"#.into());
        }

        if key == "countries" {
            assert!(cookie.is_some(), "countries requested without cookie");
            return Self::respond(200, serde_json::to_string(&self.countries).unwrap());
        }
        if key.starts_with("leaders:") {
            assert!(cookie.is_some(), "leaders requested without cookie");
            let body = self.leaders.get(&country.unwrap_or_default()).cloned().unwrap_or_else(|| "[]".into());
            return Self::respond(200, body);
        }
        match self.pages.get(url) {
            Some(html) => Self::respond(200, html.clone()),
            None => Self::respond(404, "not found".into()),
        }
    }
}

pub fn leader_json(id: &str, name: &str, url: &str) -> String {
    let (first, last) = name.split_once(' ').unwrap_or((name, ""));
    serde_json::json!({
        "id": id,
        "first_name": first,
        "last_name": last,
        "birth_date": "1950-01-01",
        "death_date": null,
        "place_of_birth": "Somewhere",
        "wikipedia_url": url,
        "start_mandate": "2000-01-01",
        "end_mandate": null,
    })
    .to_string()
}

pub fn wiki_page(lead_html: &str) -> String {
    format!(
        r#"<html><body><div class="mw-parser-output">
           <p class="mw-empty-elt"></p>
           {lead_html}
           <h2>Biography</h2><p><b>Not</b> the lead.</p>
           </div></body></html>"#
    )
}
