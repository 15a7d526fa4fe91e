use crate::config::AppConfig;
use crate::data::Datasets;
use crate::error::AppError;
use crate::filter::Selection;
use crate::pages;
use crate::pledge::PledgeSubmission;
use crate::render::page_shell;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageId {
    Home,
    ArtBrowser,
    TrendChart,
    MapExplorer,
    PledgeForm,
}

impl PageId {
    /// Navigation order.
    pub const ALL: [PageId; 5] = [
        PageId::Home,
        PageId::ArtBrowser,
        PageId::TrendChart,
        PageId::MapExplorer,
        PageId::PledgeForm,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PageId::Home => "Home",
            PageId::ArtBrowser => "Traditional Art",
            PageId::TrendChart => "Tourism Trends",
            PageId::MapExplorer => "Cultural Map",
            PageId::PledgeForm => "Responsible Tourism",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PageId::Home => "🏠",
            PageId::ArtBrowser => "🎨",
            PageId::TrendChart => "📊",
            PageId::MapExplorer => "🗺️",
            PageId::PledgeForm => "🌿",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::ArtBrowser => "art",
            PageId::TrendChart => "trends",
            PageId::MapExplorer => "map",
            PageId::PledgeForm => "pledge",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            PageId::Home => "/",
            PageId::ArtBrowser => "/art",
            PageId::TrendChart => "/trends",
            PageId::MapExplorer => "/map",
            PageId::PledgeForm => "/pledge",
        }
    }
}

impl FromStr for PageId {
    type Err = AppError;

    fn from_str(slug: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .into_iter()
            .find(|p| p.slug() == slug)
            .ok_or_else(|| AppError::InvalidState(format!("no page named '{}'", slug)))
    }
}

/// Everything a page may depend on for one render: the current filter
/// values and, on the pledge page, a submitted form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub region: Selection,
    pub kind: Selection,
    pub pledge: Option<PledgeSubmission>,
}

/// Read-only inputs shared by every render.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub data: &'a Datasets,
    pub config: &'a AppConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub page: PageId,
    pub html: String,
}

/// Renders exactly one page as a complete HTML document.
pub fn route(page: PageId, ctx: RenderContext<'_>, state: &ViewState) -> Result<RenderOutput, AppError> {
    tracing::debug!("Rendering {:?} with {:?}", page, state);
    let body = match page {
        PageId::Home => pages::home(ctx),
        PageId::ArtBrowser => pages::art_browser(ctx, &state.region, &state.kind),
        PageId::TrendChart => pages::trend_chart(ctx),
        PageId::MapExplorer => pages::map_explorer(ctx, &state.kind)?,
        PageId::PledgeForm => pages::pledge_form(state.pledge.as_ref()),
    };
    Ok(RenderOutput {
        page,
        html: page_shell(&ctx.config.site, page, &body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip() {
        for page in PageId::ALL {
            assert_eq!(page.slug().parse::<PageId>().unwrap(), page);
        }
    }

    #[test]
    fn unknown_slug_is_invalid_state() {
        assert!(matches!("gallery".parse::<PageId>(), Err(AppError::InvalidState(_))));
        assert!(matches!("Art".parse::<PageId>(), Err(AppError::InvalidState(_))));
    }

    #[test]
    fn labels_in_navigation_order() {
        let labels: Vec<&str> = PageId::ALL.iter().map(PageId::label).collect();
        assert_eq!(
            labels,
            vec!["Home", "Traditional Art", "Tourism Trends", "Cultural Map", "Responsible Tourism"]
        );
    }

    #[test]
    fn route_dispatches_to_each_page() {
        let mut config = AppConfig::default();
        config.input.hotspots_csv = None;
        let data = Datasets::load(&config);
        let ctx = RenderContext { data: &data, config: &config };
        let state = ViewState::default();

        let expected = [
            (PageId::Home, "India&#39;s Cultural Lens"),
            (PageId::ArtBrowser, "Traditional Art Forms of India"),
            (PageId::TrendChart, "Tourism Trends in India"),
            (PageId::MapExplorer, "Cultural Hotspots of India"),
            (PageId::PledgeForm, "Take the Responsible Tourism Pledge"),
        ];
        for (page, heading) in expected {
            let output = route(page, ctx, &state).unwrap();
            assert_eq!(output.page, page);
            assert!(output.html.starts_with("<!DOCTYPE html>"));
            assert!(output.html.contains(heading), "{:?} missing {}", page, heading);
        }
    }
}
