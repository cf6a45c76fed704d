// Rocket instance assembly, shared by the binary and the HTTP tests

use rocket::fairing::AdHoc;
use rocket::{routes, Build, Rocket};

use crate::bot::Bot;
use crate::handler;

pub const SERVER_HEADER: &str = "cautious-snake";

/// Builds a Rocket instance serving the Battlesnake API with the given bot
pub fn build(bot: Bot) -> Rocket<Build> {
    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", SERVER_HEADER);
            })
        }))
        .mount(
            "/",
            routes![handler::index, handler::start, handler::get_move, handler::end],
        )
}
