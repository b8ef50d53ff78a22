use std::fmt::Write;

use axum::{extract::State, response::Html};

use crate::{
    db::{
        agreement_store::AgreementStore, authority_store::AuthorityStore,
        company_store::CompanyStore, letter_store::LetterStore, lorry_store::LorryStore,
        route_store::RouteStore,
    },
    error::Result,
    handlers::AppState,
};

/// GET /admin/ - HTML dashboard assembling all entities
pub async fn view_dashboard(State(state): State<AppState>) -> Result<Html<String>> {
    let companies = CompanyStore::new(state.pool.clone()).get_all().await?;
    let agreements = AgreementStore::new(state.pool.clone()).get_all().await?;
    let lorries = LorryStore::new(state.pool.clone()).get_all().await?;
    let authorities = AuthorityStore::new(state.pool.clone()).get_all().await?;
    let routes = RouteStore::new(state.pool.clone()).get_all_with_stops().await?;
    let letters = LetterStore::new(state.pool).get_all().await?;

    let mut html = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Transport Admin</title>\n</head>\n<body>\n<h1>Transport Admin</h1>\n",
    );

    let _ = write!(html, "<section id=\"company\">\n<h2>Companies</h2>\n<table>\n");
    for c in &companies {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            c.id,
            escape(&c.name),
            escape(&c.address),
            escape(&c.phone),
            escape(&c.email),
        );
    }
    html.push_str("</table>\n</section>\n");

    let _ = write!(html, "<section id=\"agreement\">\n<h2>Agreements</h2>\n<table>\n");
    for a in &agreements {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            a.id,
            escape(&a.loa_number),
            escape(a.company_name.as_deref().unwrap_or("-")),
            a.total_mt_km,
            a.rate_per_mt_km,
            if a.is_active { "active" } else { "" },
        );
    }
    html.push_str("</table>\n</section>\n");

    let _ = write!(html, "<section id=\"lorry\">\n<h2>Lorries</h2>\n<table>\n");
    for l in &lorries {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            l.id,
            escape(&l.capacity),
            escape(&l.carrier_size),
            l.number_of_wheels.map(|n| n.to_string()).unwrap_or_default(),
            escape(&l.remarks),
        );
    }
    html.push_str("</table>\n</section>\n");

    let _ = write!(html, "<section id=\"authority\">\n<h2>Location Authorities</h2>\n<table>\n");
    for a in &authorities {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            a.id,
            escape(&a.location),
            escape(&a.authority),
            escape(&a.address),
        );
    }
    html.push_str("</table>\n</section>\n");

    let _ = write!(html, "<section id=\"route\">\n<h2>Routes</h2>\n");
    for r in &routes {
        let _ = write!(
            html,
            "<h3>{} {}</h3>\n<ol>\n",
            r.route.id,
            escape(&r.route.name),
        );
        for s in &r.stops {
            let _ = write!(
                html,
                "<li>{} ({:?}, order {})</li>\n",
                escape(&s.location),
                s.stop_type,
                s.stop_order,
            );
        }
        html.push_str("</ol>\n");
    }
    html.push_str("</section>\n");

    let _ = write!(html, "<section id=\"letter\">\n<h2>Letters</h2>\n<table>\n");
    for l in &letters {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:?}</td><td>{}</td><td>{}</td></tr>\n",
            l.id,
            escape(&l.letter_number),
            l.state,
            l.booking_serial,
            l.date,
        );
    }
    html.push_str("</table>\n</section>\n</body>\n</html>\n");

    Ok(Html(html))
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
