use tera::Tera;

/// Every template the service renders, embedded at compile time.
pub fn load_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("cards/_qr.svg", include_str!("../templates/cards/_qr.svg")),
        ("cards/classic.svg", include_str!("../templates/cards/classic.svg")),
        ("cards/minimalist.svg", include_str!("../templates/cards/minimalist.svg")),
        ("cards/elegant.svg", include_str!("../templates/cards/elegant.svg")),
        ("pages/base.html", include_str!("../templates/pages/base.html")),
        ("pages/invitation.html", include_str!("../templates/pages/invitation.html")),
        ("pages/state.html", include_str!("../templates/pages/state.html")),
        ("pages/guest.html", include_str!("../templates/pages/guest.html")),
        ("sitemap.xml", include_str!("../templates/sitemap.xml")),
    ])?;
    tera.autoescape_on(vec![".html", ".svg"]);
    Ok(tera)
}
