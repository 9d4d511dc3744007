//! HTML Rendering
//!
//! askama templates for the page and each widget container. Widget models are
//! flattened into plain display fields before they reach a template.

use askama::Template;

use crate::widgets::finance::FinanceItem;
use crate::widgets::nav::{Navigation, NAV_SCRIPT};
use crate::widgets::news::{NewsCard, BROKEN_IMAGE_URL};
use crate::widgets::weather::{AqiDisplay, WeatherPanel};
use crate::widgets::Dashboard;

pub type RenderResult = Result<String, askama::Error>;

#[derive(Template)]
#[template(
    ext = "html",
    source = r##"<div class="weather-card">
    <h3>{{ location }}</h3>
    <div id="weather-icon"><i class="{{ icon_class }}"></i></div>
    <div class="weather-temp"><span id="temp-val">{{ temperature }}</span>&deg;C</div>
    <div id="weather-desc">{{ description }}</div>
    <div class="weather-meta">Wind: <span id="wind-speed">{{ wind_speed }}</span></div>
    <div class="weather-meta">AQI: <span id="aqi-val">{% if has_aqi %}<span class="aqi-badge" style="background-color: {{ aqi_color }}">{{ aqi_text }}</span>{% else %}N/A{% endif %}</span></div>
</div>"##
)]
struct WeatherTemplate<'a> {
    location: &'a str,
    temperature: &'a str,
    wind_speed: &'a str,
    description: &'a str,
    icon_class: &'a str,
    has_aqi: bool,
    aqi_text: &'a str,
    aqi_color: &'a str,
}

/// Contents of the weather container
pub fn weather(panel: &WeatherPanel) -> RenderResult {
    let (has_aqi, aqi_text, aqi_color) = match &panel.aqi {
        AqiDisplay::Reading { text, color, .. } => (true, text.as_str(), *color),
        AqiDisplay::Unavailable => (false, "", ""),
    };

    WeatherTemplate {
        location: &panel.location,
        temperature: &panel.temperature,
        wind_speed: &panel.wind_speed,
        description: &panel.description,
        icon_class: panel.icon_class,
        has_aqi,
        aqi_text,
        aqi_color,
    }
    .render()
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r##"<a class="news-card" href="{{ link }}" target="_blank" rel="noopener">
    <div class="news-header">{{ header }} <span style="font-size:0.8em; opacity:0.8">({{ source }})</span></div>
    <img src="{{ image }}" alt="{{ headline }}" onerror="this.onerror=null;this.src='{{ broken_image }}'">
    <div class="news-body">
        <h4>{{ headline }}</h4>
        <small>{{ published }}</small>
        <p style="font-size: 0.9em; margin-top: 10px;">{{ snippet }}</p>
    </div>
</a>"##
)]
struct StoryTemplate<'a> {
    link: &'a str,
    header: &'a str,
    source: &'a str,
    image: &'a str,
    broken_image: &'a str,
    headline: &'a str,
    published: &'a str,
    snippet: &'a str,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r##"<a class="news-card" href="javascript:void(0)">
    <div class="news-header">{{ header }}</div>
    <div class="news-body">
        <h4>News failed to load.</h4>
        <p>Please check your connection or try again later.</p>
    </div>
</a>"##
)]
struct FailedNewsTemplate<'a> {
    header: &'a str,
}

/// One card of the news container
pub fn news_card(card: &NewsCard) -> RenderResult {
    match card {
        NewsCard::Story(story) => StoryTemplate {
            link: &story.link,
            header: &story.header,
            source: &story.source,
            image: story.image.url(),
            broken_image: BROKEN_IMAGE_URL,
            headline: &story.headline,
            published: &story.published,
            snippet: &story.snippet,
        }
        .render(),
        NewsCard::Failed { header } => FailedNewsTemplate { header }.render(),
    }
}

/// Contents of the news container
pub fn news(cards: &[NewsCard]) -> RenderResult {
    let mut html = String::new();
    for card in cards {
        html.push_str(&news_card(card)?);
        html.push('\n');
    }
    Ok(html)
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r##"{% for item in items %}<div class="finance-card" data-item="{{ item.id.as_str() }}">
    <div class="finance-icon"><i class="{{ item.icon }}"></i></div>
    <h4>{{ item.name }}</h4>
    <div class="finance-price">{{ item.formatted_price }}</div>
    <small>{{ item.unit }}</small>
</div>
{% endfor %}"##
)]
struct FinanceTemplate<'a> {
    items: &'a [FinanceItem],
}

/// Contents of the finance container
pub fn finance(items: &[FinanceItem]) -> RenderResult {
    FinanceTemplate { items }.render()
}

/// A nav entry as rendered
struct NavEntry<'a> {
    label: &'a str,
    href: &'a str,
    section: &'a str,
}

#[derive(Template)]
#[template(
    ext = "html",
    source = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{{ title }}</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
    <style>
        html { scroll-behavior: smooth; }
        body { font-family: system-ui, sans-serif; margin: 0; background: #f4f6f4; color: #1d2b1d; }
        nav { background: #023020; }
        nav ul { display: flex; gap: 1.5rem; list-style: none; margin: 0; padding: 1rem 2rem; }
        nav a { color: #fff; text-decoration: none; }
        section { padding: 2rem; }
        .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; }
        .news-card, .finance-card, .weather-card { background: #fff; border-radius: 8px; padding: 1rem; color: inherit; text-decoration: none; }
        .news-card img { width: 100%; border-radius: 4px; }
        .aqi-badge { color: #fff; padding: 2px 8px; border-radius: 10px; }
    </style>
</head>
<body>
<nav>
    <ul>
    {% for link in links %}<li><a href="{{ link.href }}"{% if !link.section.is_empty() %} data-section="{{ link.section }}"{% endif %}>{{ link.label }}</a></li>
    {% endfor %}</ul>
</nav>
<section id="home">
    <h1>{{ title }}</h1>
</section>
<section id="weather">
    <h2>Weather</h2>
    <div id="weather-container">{{ weather_html|safe }}</div>
</section>
<section id="news">
    <h2>News</h2>
    <div id="news-container" class="grid">{{ news_html|safe }}</div>
</section>
<section id="finance">
    <h2>Markets</h2>
    <div id="finance-container" class="grid">{{ finance_html|safe }}</div>
</section>
<script>{{ nav_script|safe }}</script>
</body>
</html>"##
)]
struct PageTemplate<'a> {
    title: &'a str,
    links: Vec<NavEntry<'a>>,
    weather_html: String,
    news_html: String,
    finance_html: String,
    nav_script: &'a str,
}

/// The full page with every widget filled in
pub fn page(title: &str, navigation: &Navigation, dashboard: &Dashboard) -> RenderResult {
    for link in navigation.dangling() {
        tracing::debug!(href = %link.href, "Nav link has no matching section");
    }

    let links = navigation
        .links()
        .iter()
        .map(|link| NavEntry {
            label: &link.label,
            href: &link.href,
            section: navigation.resolve(&link.href).unwrap_or_default(),
        })
        .collect();

    PageTemplate {
        title,
        links,
        weather_html: weather(&dashboard.weather)?,
        news_html: news(&dashboard.news)?,
        finance_html: finance(&dashboard.finance)?,
        nav_script: NAV_SCRIPT,
    }
    .render()
}
