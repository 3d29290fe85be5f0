use crate::infra::{load_catalog, InMemoryOnboardingDirectory};
use aisle::error::AppError;
use aisle::marketplace::access::{
    AccessDecision, OnboardingStatusSource, RouteAccessGuard, SessionState, SiteMap, UserId,
    UserRole,
};
use aisle::marketplace::directory::{
    BrowseSession, DirectoryFacets, DirectoryPageView, DirectoryService, FilterState,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// Free-text query matched against names, descriptions, and style tags
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Category to keep, e.g. "Venue" ("all" lifts the constraint)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Location fragment to keep, e.g. "Austin" (matched case-sensitively)
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Price tier glyphs, e.g. "$$"
    #[arg(long)]
    pub(crate) price: Option<String>,
    /// Minimum rating on the 0-5 scale
    #[arg(long)]
    pub(crate) min_rating: Option<f32>,
    /// Availability to keep, e.g. "Available"
    #[arg(long)]
    pub(crate) availability: Option<String>,
    /// Style tag vendors must carry; repeat the flag for alternatives
    #[arg(long = "style")]
    pub(crate) styles: Vec<String>,
    /// Results page to print
    #[arg(long, default_value_t = 1)]
    pub(crate) page: i64,
    /// Vendors per page
    #[arg(long)]
    pub(crate) per_page: Option<usize>,
    /// Print the filter facets before the results
    #[arg(long)]
    pub(crate) facets: bool,
    /// CSV catalog to search instead of the bundled sample
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// CSV catalog to browse instead of the bundled sample
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Skip the navigation gating portion of the demo
    #[arg(long)]
    pub(crate) skip_navigation: bool,
}

pub(crate) fn run_directory_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        query,
        category,
        location,
        price,
        min_rating,
        availability,
        styles,
        page,
        per_page,
        facets,
        catalog,
    } = args;

    let catalog = load_catalog(catalog.as_deref())?;
    let service = DirectoryService::new(catalog);

    if facets {
        render_facets(&service.facets());
        println!();
    }

    let mut filters = FilterState::default();
    if let Some(query) = query {
        filters.search_query = query;
    }
    if let Some(category) = category {
        filters.category = category;
    }
    if let Some(location) = location {
        filters.location = location;
    }
    if let Some(price) = price {
        filters.price_tier = price;
    }
    if let Some(min_rating) = min_rating {
        filters.rating_floor = min_rating;
    }
    if let Some(availability) = availability {
        filters.availability = availability;
    }
    filters.styles = styles;
    if let Some(per_page) = per_page {
        filters.items_per_page = per_page.max(1);
    }

    let view = service.browse(&filters, page);
    render_vendor_page(&view);

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog,
        skip_navigation,
    } = args;

    println!("Aisle marketplace demo");
    let catalog = load_catalog(catalog.as_deref())?;
    println!(
        "Catalog: {} vendors loaded, {} records rejected",
        catalog.len(),
        catalog.rejected().len()
    );

    let service = DirectoryService::new(catalog);
    render_facets(&service.facets());

    let mut session = BrowseSession::new();
    session.set_items_per_page(4);

    println!("\nAll vendors, four per page");
    render_vendor_page(&session.page_view(service.catalog().vendors()));

    session.request_page(99);
    let view = session.page_view(service.catalog().vendors());
    println!(
        "\nRequesting page 99 lands on the last real page ({} of {})",
        view.page, view.total_pages
    );

    session.set_category("Venue");
    let view = session.page_view(service.catalog().vendors());
    println!(
        "\nNarrowed to venues; back on page {} with {} matching vendors",
        view.page, view.total_matches
    );
    render_vendor_page(&view);

    session.toggle_style("rustic");
    let view = session.page_view(service.catalog().vendors());
    println!("\nRustic venues only");
    render_vendor_page(&view);

    if skip_navigation {
        return Ok(());
    }

    println!("\nNavigation gating demo");
    let onboarding = Arc::new(InMemoryOnboardingDirectory::default());
    let guard = RouteAccessGuard::new(
        SiteMap::default(),
        onboarding.clone(),
        Duration::from_secs(5),
    );

    let anonymous = SessionState::Anonymous;
    let couple = SessionState::authenticated("couple-3", UserRole::Couple);
    let vendor = SessionState::authenticated("vendor-7", UserRole::Vendor);

    render_decision(&guard, &anonymous, "/dashboard").await;
    render_decision(&guard, &couple, "/dashboard").await;
    render_decision(&guard, &couple, "/vendor/dashboard").await;
    render_decision(&guard, &vendor, "/vendor/bookings").await;

    println!("\nvendor-7 finishes onboarding; the guard re-checks after a reset");
    onboarding.mark(UserId("vendor-7".to_string()), true);
    guard.reset();
    render_decision(&guard, &vendor, "/vendor/bookings").await;

    if let Some(probe) = guard.last_probe() {
        println!(
            "Last onboarding probe: {} on {} -> {} at {}",
            probe.user_id.0,
            probe.path,
            probe.status.label(),
            probe.resolved_at
        );
    }

    Ok(())
}

async fn render_decision<S>(guard: &RouteAccessGuard<S>, session: &SessionState, path: &str)
where
    S: OnboardingStatusSource + 'static,
{
    let decision = guard.evaluate(session, path).await;
    let location = match decision {
        AccessDecision::Redirect(target) => format!(" -> {}", target.location(guard.sitemap())),
        _ => String::new(),
    };
    println!(
        "- {} requesting {}: {}{}",
        describe_session(session),
        path,
        decision.summary(),
        location
    );
}

fn describe_session(session: &SessionState) -> String {
    match session {
        SessionState::Resolving => "resolving session".to_string(),
        SessionState::Anonymous => "anonymous visitor".to_string(),
        SessionState::Authenticated { user, profile } => {
            format!("{} {}", profile.user_role.label(), user.id.0)
        }
    }
}

fn render_vendor_page(view: &DirectoryPageView) {
    if view.vendors.is_empty() {
        println!("No vendors match the current filters");
        return;
    }

    for vendor in &view.vendors {
        println!(
            "- {} | {} | {} | {} | rated {:.1} | {}",
            vendor.name,
            vendor.category,
            vendor.location,
            vendor.price,
            vendor.rating,
            vendor.availability
        );
        if !vendor.tags.is_empty() {
            println!("    styles: {}", vendor.tags.join(", "));
        }
    }
    println!(
        "Page {} of {} ({} matching vendors, {} per page)",
        view.page, view.total_pages, view.total_matches, view.per_page
    );
}

fn render_facets(facets: &DirectoryFacets) {
    println!("\nFilter facets");
    println!("- categories: {}", facets.categories.join(", "));
    println!("- locations: {}", facets.locations.join(", "));
    println!("- styles: {}", facets.styles.join(", "));
    println!("- availability: {}", facets.availability.join(", "));
}
