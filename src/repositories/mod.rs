//! # Repository Layer
//!
//! Repositories wrap SeaORM queries per aggregate. Each borrows any
//! [`sea_orm::ConnectionTrait`] so the same code runs on the pool or inside a
//! transaction.

pub mod compromiso;
pub mod ong;
pub mod pedido;
pub mod project;

pub use compromiso::{CompromisoDetail, CompromisoRepository, NewCompromiso};
pub use ong::OngRepository;
pub use pedido::{NewPedido, OpenPedido, PedidoRepository};
pub use project::{NewProject, ProjectRepository, ProjectWithPlans};
