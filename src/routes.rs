use crate::{
    api::employee,
    auth::{handlers, middleware::session_middleware},
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Public routes
    cfg.service(
        web::resource("/")
            .route(web::get().to(handlers::login_page))
            .route(web::post().to(handlers::login)),
    )
    .service(web::resource("/logout").route(web::get().to(handlers::logout)));

    // Session-protected routes
    cfg.service(
        web::scope("/funcionarios")
            .wrap(from_fn(session_middleware))
            // /funcionarios
            .service(web::resource("").route(web::get().to(employee::list_employees)))
            // /funcionarios/add
            .service(
                web::resource("/add")
                    .route(web::get().to(employee::add_form))
                    .route(web::post().to(employee::create_employee)),
            )
            // /funcionarios/edit/{id}
            .service(
                web::resource("/edit/{id}")
                    .route(web::get().to(employee::edit_form))
                    .route(web::post().to(employee::update_employee)),
            )
            // /funcionarios/delete/{id}
            .service(
                web::resource("/delete/{id}").route(web::get().to(employee::delete_employee)),
            )
            // /funcionarios/export
            .service(web::resource("/export").route(web::get().to(employee::export))),
    );
}

// LOGIN (POST /)
//  └─ session cookie (signed JWT, SESSION_TTL)

// /funcionarios/**
//  ├─ valid cookie   -> handler
//  └─ missing/stale  -> 303 /
