//! Wire format of Appcues API experience responses and its mapping into the
//! [`experience`](crate::experience) model.
mod action_mapper;
mod mapper;
pub mod models;
pub mod primitive;
mod primitive_mapper;

pub use mapper::ExperienceMapper;
pub(crate) use primitive_mapper::{map_color, map_style};
pub use models::{ExperienceResponse, TryParse, Undecodable};
