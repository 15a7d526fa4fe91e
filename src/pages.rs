use crate::chart::TrendChart;
use crate::error::AppError;
use crate::filter::{filter, selector_options, ArtField, Criterion, HotspotField, Selection};
use crate::map::MapView;
use crate::pledge::{validate, PledgeSubmission};
use crate::render::{alert, esc, select_control, table};
use crate::router::{PageId, RenderContext};

pub const CHART_TITLE: &str = "Monthly Tourist Visitors by State";

pub fn home(ctx: RenderContext<'_>) -> String {
    let site = &ctx.config.site;
    format!(
        "<h1>🇮🇳 {title}</h1>\
         <p>Welcome to <strong>{title}</strong>, a platform that bridges <strong>art</strong>, \
         <strong>culture</strong>, and <strong>tourism</strong> through <strong>data and maps</strong>. 🎨🛕🌏</p>\
         <ul>\
         <li>🔍 <a href=\"{art}\">Discover traditional art forms</a></li>\
         <li>📊 <a href=\"{trends}\">Explore tourism trends</a></li>\
         <li>🗺️ <a href=\"{map}\">Interact with cultural hotspots map</a></li>\
         <li>🌿 <a href=\"{pledge}\">Take a pledge for responsible tourism</a></li>\
         </ul>\
         <img class=\"banner\" src=\"{banner}\" alt=\"Art and culture of India\">\
         <hr>",
        title = esc(&site.title),
        banner = esc(&site.banner_url),
        art = PageId::ArtBrowser.path(),
        trends = PageId::TrendChart.path(),
        map = PageId::MapExplorer.path(),
        pledge = PageId::PledgeForm.path(),
    )
}

pub fn art_browser(ctx: RenderContext<'_>, region: &Selection, kind: &Selection) -> String {
    let art = &ctx.data.art;
    let criteria = [
        Criterion::new(ArtField::Region, region.clone()),
        Criterion::new(ArtField::Type, kind.clone()),
    ];
    let rows: Vec<Vec<String>> = filter(art, &criteria)
        .into_iter()
        .map(|r| vec![r.name, r.region, r.kind.to_string()])
        .collect();

    let mut out = String::from(
        "<h2>🎨 Traditional Art Forms of India</h2>\
         <p>Use the filters to explore by region or type of art.</p>",
    );
    out.push_str(&format!("<form method=\"get\" action=\"{}\">", PageId::ArtBrowser.path()));
    out.push_str(&select_control(
        "region",
        "Select Region",
        &selector_options(art, ArtField::Region),
        region.as_str(),
    ));
    out.push_str(&select_control(
        "type",
        "Select Type",
        &selector_options(art, ArtField::Type),
        kind.as_str(),
    ));
    out.push_str("<noscript><button type=\"submit\">Apply</button></noscript></form><br>");
    out.push_str(&table(&["Art Form", "Region", "Type"], &rows));
    out
}

pub fn trend_chart(ctx: RenderContext<'_>) -> String {
    let chart = TrendChart::from_records(CHART_TITLE, &ctx.data.visitors);
    format!(
        "<h2>📊 Tourism Trends in India</h2>\
         <p>Visualizing footfall across cultural hotspots over time. (Sample data shown here)</p>{}",
        chart.to_svg()
    )
}

pub fn map_explorer(ctx: RenderContext<'_>, kind: &Selection) -> Result<String, AppError> {
    let hotspots = &ctx.data.hotspots;
    let visible = filter(hotspots, &[Criterion::new(HotspotField::Type, kind.clone())]);
    let view = MapView::new(&ctx.config.map, &visible);

    let mut out = String::from(
        "<h2>🗺️ Cultural Hotspots of India</h2>\
         <p>Filter by type of cultural experience (craft, temple, heritage site, etc.)</p>",
    );
    out.push_str(&format!("<form method=\"get\" action=\"{}\">", PageId::MapExplorer.path()));
    out.push_str(&select_control(
        "type",
        "Select Type",
        &selector_options(hotspots, HotspotField::Type),
        kind.as_str(),
    ));
    out.push_str("<noscript><button type=\"submit\">Apply</button></noscript></form><br>");
    out.push_str(&view.to_html()?);
    Ok(out)
}

/// The pledge form, followed by the validation outcome once submitted.
pub fn pledge_form(submission: Option<&PledgeSubmission>) -> String {
    let outcome = submission.map(validate);
    // A successful pledge clears the form; a warning keeps what was typed.
    let echo = match (&outcome, submission) {
        (Some(o), Some(s)) if !o.is_success() => s.clone(),
        _ => PledgeSubmission::default(),
    };

    let mut out = String::from(
        "<h2>🌿 Responsible Tourism</h2>\
         <p>Travelling responsibly helps protect India's culture, environment, and communities. \
         Take this pledge to travel with respect and care. 🌏</p>\
         <h3>✋ Take the Responsible Tourism Pledge</h3>",
    );
    out.push_str(&format!(
        "<form id=\"pledge_form\" method=\"post\" action=\"{}\">\
         <label for=\"name\">Your Name</label><input type=\"text\" id=\"name\" name=\"name\" value=\"{}\">\
         <label for=\"email\">Email (optional)</label><input type=\"text\" id=\"email\" name=\"email\" value=\"{}\">\
         <label><input type=\"checkbox\" name=\"agreed\" value=\"on\"{}> \
         I pledge to respect local culture, support eco-friendly tourism, and leave no trace.</label>\
         <br><button type=\"submit\">Take the Pledge</button>",
        PageId::PledgeForm.path(),
        esc(&echo.name),
        esc(&echo.email),
        if echo.agreed { " checked" } else { "" },
    ));
    if let Some(outcome) = outcome {
        out.push_str(&alert(outcome.is_success(), &outcome.message()));
    }
    out.push_str("</form>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::data::Datasets;

    fn with_ctx<T>(f: impl FnOnce(RenderContext<'_>) -> T) -> T {
        let mut config = AppConfig::default();
        config.input.hotspots_csv = None;
        let data = Datasets::load(&config);
        f(RenderContext { data: &data, config: &config })
    }

    fn value(v: &str) -> Selection {
        Selection::Value(v.to_string())
    }

    #[test]
    fn home_links_every_section() {
        let html = with_ctx(home);
        for path in ["/art", "/trends", "/map", "/pledge"] {
            assert!(html.contains(&format!("href=\"{}\"", path)));
        }
        assert!(html.contains("Art_and_culture_banner.jpg"));
    }

    #[test]
    fn art_browser_unfiltered_lists_all_rows() {
        let html = with_ctx(|ctx| art_browser(ctx, &Selection::All, &Selection::All));
        assert_eq!(html.matches("<tr>").count(), 7);
        assert!(html.contains("<option value=\"Tamil Nadu\">Tamil Nadu</option>"));
        assert!(html.contains("<option value=\"All\" selected>All</option>"));
    }

    #[test]
    fn art_browser_applies_both_filters() {
        let html = with_ctx(|ctx| art_browser(ctx, &value("Bihar"), &value("Painting")));
        assert!(html.contains("<td>Madhubani</td><td>Bihar</td><td>Painting</td>"));
        assert!(!html.contains("<td>Warli</td>"));
        assert!(html.contains("<option value=\"Bihar\" selected>"));
        assert!(html.contains("<option value=\"Painting\" selected>"));
    }

    #[test]
    fn art_browser_with_no_matches_keeps_table() {
        let html = with_ctx(|ctx| art_browser(ctx, &value("Bihar"), &value("Dance")));
        assert_eq!(html.matches("<tr>").count(), 1);
        assert!(html.contains("<th>Art Form</th>"));
    }

    #[test]
    fn trend_chart_has_three_series() {
        let html = with_ctx(trend_chart);
        assert!(html.contains(CHART_TITLE));
        assert_eq!(html.matches("<polyline class=\"series\"").count(), 3);
    }

    #[test]
    fn map_explorer_filters_markers() {
        let all = with_ctx(|ctx| map_explorer(ctx, &Selection::All)).unwrap();
        assert!(all.contains("data-markers=\"4\""));

        let crafts = with_ctx(|ctx| map_explorer(ctx, &value("Craft"))).unwrap();
        assert!(crafts.contains("data-markers=\"2\""));
        assert!(!crafts.contains("\"color\":\"blue\""));
        assert!(crafts.contains("<option value=\"Craft\" selected>"));

        let none = with_ctx(|ctx| map_explorer(ctx, &value("Museum"))).unwrap();
        assert!(none.contains("data-markers=\"0\""));
    }

    #[test]
    fn pledge_form_without_submission_shows_no_message() {
        let html = pledge_form(None);
        assert!(html.contains("Take the Pledge"));
        assert!(!html.contains("class=\"alert"));
    }

    #[test]
    fn pledge_success_thanks_by_name() {
        let submission = PledgeSubmission {
            name: "Asha".to_string(),
            email: String::new(),
            agreed: true,
        };
        let html = pledge_form(Some(&submission));
        assert!(html.contains("alert success"));
        assert!(html.contains("Thank you, Asha, for taking the pledge!"));
        assert!(html.contains("name=\"name\" value=\"\""));
    }

    #[test]
    fn pledge_warning_echoes_input() {
        let submission = PledgeSubmission {
            name: "Asha <3".to_string(),
            email: "asha@example.com".to_string(),
            agreed: false,
        };
        let html = pledge_form(Some(&submission));
        assert!(html.contains("alert warning"));
        assert!(html.contains("Please agree to the pledge to submit."));
        assert!(html.contains("value=\"Asha &lt;3\""));
        assert!(html.contains("value=\"asha@example.com\""));
    }
}
