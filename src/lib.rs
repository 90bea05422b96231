//! Backend of a small multi-page app: item and user records in a document
//! store, a quiz mini-game with a running high score, and an analytics report.
//!
//! # Routes
//!
//! | method   | path              | purpose                              |
//! |----------|-------------------|--------------------------------------|
//! | `GET`    | `/`               | liveness message                     |
//! | `GET`    | `/items`          | list items                           |
//! | `POST`   | `/items`          | create item                          |
//! | `DELETE` | `/items/{id}`     | delete item                          |
//! | `GET`    | `/users`          | list users                           |
//! | `POST`   | `/users`          | create user (unique username)        |
//! | `DELETE` | `/users/{id}`     | delete user                          |
//! | `GET`    | `/quiz/question`  | next question of the current cycle   |
//! | `POST`   | `/quiz/answer`    | score an answer                      |
//! | `GET`    | `/quiz/highscore` | best score seen                      |
//! | `POST`   | `/quiz/reset`     | start a new question cycle           |
//! | `GET`    | `/analytics`      | name-length stats and chart          |
//!
//! # Running
//!
//! ```sh
//! cargo run -- 127.0.0.1:8000
//! ```
//!
//! See [`config::Config`] for the environment variables.
pub mod analytics;
pub mod config;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod loggers;
pub mod models;
pub mod quiz;
pub mod resources;
pub mod server;
pub mod state;
pub mod store;
