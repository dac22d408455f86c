use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Swim,
    Bike,
    Run,
    Brick,
    Rest,
    Race,
    Other,
}

impl Sport {
    /// Order used by the calendar legend.
    pub fn legend() -> [Sport; 7] {
        [
            Sport::Swim,
            Sport::Bike,
            Sport::Run,
            Sport::Brick,
            Sport::Race,
            Sport::Rest,
            Sport::Other,
        ]
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Sport::Swim => "🏊",
            Sport::Bike => "🚴",
            Sport::Run => "🏃",
            Sport::Brick => "🔀",
            Sport::Rest => "✨",
            Sport::Race => "🏆",
            Sport::Other => "💪",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            Sport::Swim => "bg-blue-500/20 border-blue-400 text-blue-200",
            Sport::Bike => "bg-green-500/20 border-green-400 text-green-200",
            Sport::Run => "bg-red-500/20 border-red-400 text-red-200",
            Sport::Brick => "bg-purple-500/20 border-purple-400 text-purple-200",
            Sport::Rest => "bg-gray-500/20 border-gray-400 text-gray-300",
            Sport::Race => "bg-yellow-500/30 border-yellow-400 text-yellow-200",
            Sport::Other => "bg-indigo-500/20 border-indigo-400 text-indigo-200",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sport::Swim => "Swimming",
            Sport::Bike => "Cycling",
            Sport::Run => "Running",
            Sport::Brick => "Brick",
            Sport::Rest => "Rest",
            Sport::Race => "Race Day",
            Sport::Other => "Other",
        }
    }

    /// Maps an exported activity type ("Run", "Ride", "VirtualRide", ...) onto a sport.
    pub fn from_activity_type(kind: &str) -> Sport {
        match kind.trim().to_lowercase().as_str() {
            "run" | "trailrun" | "virtualrun" => Sport::Run,
            "ride" | "bike" | "virtualride" | "cycling" => Sport::Bike,
            "swim" | "swimming" => Sport::Swim,
            "walk" | "hike" => Sport::Rest,
            _ => Sport::Other,
        }
    }
}

pub fn icon_for(sport: Sport) -> &'static str {
    sport.icon()
}

pub fn color_class_for(sport: Sport) -> &'static str {
    sport.color_class()
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Sport::Swim => "swim",
            Sport::Bike => "bike",
            Sport::Run => "run",
            Sport::Brick => "brick",
            Sport::Rest => "rest",
            Sport::Race => "race",
            Sport::Other => "other",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sport_has_distinct_icon_and_color() {
        let legend = Sport::legend();
        for (i, a) in legend.iter().enumerate() {
            for b in &legend[i + 1..] {
                assert_ne!(a.icon(), b.icon());
                assert_ne!(a.color_class(), b.color_class());
            }
        }
        assert_eq!(icon_for(Sport::Brick), "🔀");
        assert_eq!(color_class_for(Sport::Race), Sport::Race.color_class());
    }

    #[test]
    fn test_from_activity_type() {
        assert_eq!(Sport::from_activity_type("Run"), Sport::Run);
        assert_eq!(Sport::from_activity_type("VirtualRide"), Sport::Bike);
        assert_eq!(Sport::from_activity_type("swim"), Sport::Swim);
        assert_eq!(Sport::from_activity_type("Yoga"), Sport::Other);
    }
}
