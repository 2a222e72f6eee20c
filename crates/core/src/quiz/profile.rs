//! Typed reading of a finished answer set.
//!
//! Labels that do not match a known option read as `None`, so a rule keyed on
//! that question contributes nothing.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::product::FloorCategory;
use crate::domain::quiz::{Answer, AnswerSet};
use crate::quiz::questionnaire::{
    AREA_QUESTION, ENVIRONMENT_QUESTION, FEATURES_QUESTION, HUMIDITY_QUESTION,
    PREFERENCE_QUESTION, ROOM_QUESTION,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaType {
    Residential,
    Commercial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    House,
    Apartment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Room {
    LivingRoom,
    Kitchen,
    Bathroom,
    Outdoor,
    Bedroom,
    Hallway,
}

impl Room {
    /// Kitchen, bathroom and outdoor areas see routine water exposure.
    pub fn is_wet(self) -> bool {
        matches!(self, Self::Kitchen | Self::Bathroom | Self::Outdoor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    WaterResistance,
    Antibacterial,
    ThermalComfort,
    AcousticComfort,
    NonSlip,
    EasyCleaning,
}

impl Feature {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Resistente à água" => Some(Self::WaterResistance),
            "Proteção antibacteriana" => Some(Self::Antibacterial),
            "Conforto térmico" => Some(Self::ThermalComfort),
            "Conforto acústico" => Some(Self::AcousticComfort),
            "Antiderrapante" => Some(Self::NonSlip),
            "Fácil de limpar" => Some(Self::EasyCleaning),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QuizProfile {
    pub area: Option<AreaType>,
    pub environment: Option<Environment>,
    pub room: Option<Room>,
    pub humidity: Option<bool>,
    pub features: BTreeSet<Feature>,
    pub preference: Option<FloorCategory>,
}

impl QuizProfile {
    pub fn from_answers(answers: &AnswerSet) -> Self {
        let area = answers.single(AREA_QUESTION).and_then(|label| match label {
            "Residencial" => Some(AreaType::Residential),
            "Comercial" => Some(AreaType::Commercial),
            _ => None,
        });
        let environment = answers.single(ENVIRONMENT_QUESTION).and_then(|label| match label {
            "Casa" => Some(Environment::House),
            "Apartamento" => Some(Environment::Apartment),
            _ => None,
        });
        let room = answers.single(ROOM_QUESTION).and_then(|label| match label {
            "Sala" => Some(Room::LivingRoom),
            "Cozinha" => Some(Room::Kitchen),
            "Banheiro" => Some(Room::Bathroom),
            "Área externa" => Some(Room::Outdoor),
            "Quarto" => Some(Room::Bedroom),
            "Corredor" => Some(Room::Hallway),
            _ => None,
        });
        let humidity = answers.single(HUMIDITY_QUESTION).and_then(|label| match label {
            "Sim" => Some(true),
            "Não" => Some(false),
            _ => None,
        });
        let features = match answers.get(FEATURES_QUESTION) {
            Some(Answer::Multiple(labels)) => {
                labels.iter().filter_map(|label| Feature::from_label(label)).collect()
            }
            _ => BTreeSet::new(),
        };
        let preference = answers.single(PREFERENCE_QUESTION).and_then(|label| match label {
            "Piso Vinílico" => Some(FloorCategory::Vinyl),
            "Piso Laminado" => Some(FloorCategory::Laminate),
            _ => None,
        });

        Self { area, environment, room, humidity, features, preference }
    }

    /// Wet when humidity was confirmed or the room is a wet room.
    pub fn is_wet(&self) -> bool {
        self.humidity == Some(true) || self.room.is_some_and(Room::is_wet)
    }

    pub fn wants(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }
}
