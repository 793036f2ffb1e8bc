pub mod diagnosis;
pub mod disease;
pub mod disease_symptom;
pub mod image;
pub mod plant;
pub mod symptom;
pub mod treatment;
pub mod user;

pub use diagnosis::Entity as Diagnosis;
pub use disease::Entity as Disease;
pub use disease_symptom::Entity as DiseaseSymptom;
pub use image::Entity as Image;
pub use plant::Entity as Plant;
pub use symptom::Entity as Symptom;
pub use treatment::Entity as Treatment;
pub use user::Entity as User;

pub mod prelude;
