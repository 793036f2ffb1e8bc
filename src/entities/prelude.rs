pub use super::diagnosis::Entity as Diagnosis;
pub use super::disease::Entity as Disease;
pub use super::disease_symptom::Entity as DiseaseSymptom;
pub use super::image::Entity as Image;
pub use super::plant::Entity as Plant;
pub use super::symptom::Entity as Symptom;
pub use super::treatment::Entity as Treatment;
pub use super::user::Entity as User;
