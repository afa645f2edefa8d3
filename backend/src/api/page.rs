use rocket::get;
use rocket::response::content::RawHtml;

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[get("/")]
pub fn index() -> RawHtml<&'static str> {
    RawHtml(INDEX_HTML)
}
