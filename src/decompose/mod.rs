//! Decomposition: table construction and normal-form transitions

pub mod forms;
pub mod normalizer;
pub mod project;

pub use forms::NormalForm;
pub use normalizer::{
    boyce_codd_normal_form, fifth_normal_form, first_normal_form, fourth_normal_form,
    is_first_normal_form, second_normal_form, third_normal_form,
};
pub use project::{build, carry_dependencies};
