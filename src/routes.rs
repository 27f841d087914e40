/// Route table for the /api/v1 surface.
///
/// Authentication is enforced by the `UserId` extractor on the handlers
/// that need it, so public reads and authenticated mutations can share a
/// resource path.
use actix_web::web;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/token")
                    .route("/pair", web::post().to(handlers::accounts::obtain_token_pair))
                    .route("/refresh", web::post().to(handlers::accounts::refresh_token)),
            )
            .service(
                web::scope("/accounts")
                    .route("/register", web::post().to(handlers::accounts::register))
                    .service(
                        web::resource("/me")
                            .route(web::get().to(handlers::accounts::get_me))
                            .route(web::patch().to(handlers::accounts::update_me))
                            .route(web::delete().to(handlers::accounts::delete_me)),
                    )
                    .service(
                        web::resource("/me/photo")
                            .route(web::put().to(handlers::accounts::upload_photo))
                            .route(web::delete().to(handlers::accounts::delete_photo)),
                    )
                    .route(
                        "/{username}",
                        web::get().to(handlers::accounts::get_public_user),
                    ),
            )
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::posts::list_posts))
                            .route(web::post().to(handlers::posts::create_post)),
                    )
                    .service(
                        web::resource("/{post_id}")
                            .route(web::get().to(handlers::posts::get_post))
                            .route(web::delete().to(handlers::posts::delete_post)),
                    ),
            )
            .service(
                web::scope("/comments")
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::comments::list_comments))
                            .route(web::post().to(handlers::comments::create_comment)),
                    )
                    .service(
                        web::resource("/{comment_id}")
                            .route(web::get().to(handlers::comments::get_comment))
                            .route(web::delete().to(handlers::comments::delete_comment)),
                    ),
            )
            .service(
                web::scope("/reactions")
                    .service(
                        web::resource("")
                            .route(web::get().to(handlers::reactions::list_reactions))
                            .route(web::post().to(handlers::reactions::create_reaction)),
                    )
                    .route(
                        "/posts/{post_id}/count",
                        web::get().to(handlers::reactions::get_reaction_counts),
                    )
                    .route(
                        "/posts/{post_id}/my-reaction",
                        web::get().to(handlers::reactions::get_my_reaction),
                    )
                    .route(
                        "/{post_id}",
                        web::delete().to(handlers::reactions::delete_reaction),
                    ),
            ),
    );
}
