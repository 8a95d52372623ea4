//! Route registration shared by the server and HTTP tests.

use actix_web::web;

use crate::inbound::http::{auth, student, teacher};

/// Mount every API route under its scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(auth::login)
            .service(auth::register)
            .service(auth::logout)
            .service(auth::check),
    )
    .service(
        web::scope("/api/student")
            .service(student::list_slots)
            .service(student::book)
            .service(student::list_bookings),
    )
    .service(
        web::scope("/api/teacher")
            .service(teacher::create_room)
            .service(teacher::list_bookings)
            .service(teacher::list_rooms),
    );
}
