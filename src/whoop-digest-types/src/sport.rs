//! WHOOP sport codes.

use std::fmt::Display;

/// Name reported for codes that are not in the table.
pub const UNKNOWN_SPORT: &str = "Unknown";

macro_rules! sports {
    ($($variant:ident = $code:literal => $name:literal,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Sport {
            $($variant,)*
        }

        impl Sport {
            pub const ALL: &'static [Sport] = &[$(Sport::$variant,)*];

            pub fn from_code(code: i64) -> Option<Sport> {
                match code {
                    $($code => Some(Sport::$variant),)*
                    _ => None,
                }
            }

            pub fn code(self) -> i64 {
                match self {
                    $(Sport::$variant => $code,)*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Sport::$variant => $name,)*
                }
            }
        }
    };
}

sports! {
    Activity = -1 => "Activity",
    Running = 0 => "Running",
    Cycling = 1 => "Cycling",
    Baseball = 16 => "Baseball",
    Basketball = 17 => "Basketball",
    Rowing = 18 => "Rowing",
    Fencing = 19 => "Fencing",
    FieldHockey = 20 => "Field Hockey",
    Football = 21 => "Football",
    Golf = 22 => "Golf",
    IceHockey = 24 => "Ice Hockey",
    Lacrosse = 25 => "Lacrosse",
    Rugby = 27 => "Rugby",
    Sailing = 28 => "Sailing",
    Skiing = 29 => "Skiing",
    Soccer = 30 => "Soccer",
    Softball = 31 => "Softball",
    Squash = 32 => "Squash",
    Swimming = 33 => "Swimming",
    Tennis = 34 => "Tennis",
    TrackField = 35 => "Track & Field",
    Volleyball = 36 => "Volleyball",
    WaterPolo = 37 => "Water Polo",
    Wrestling = 38 => "Wrestling",
    Boxing = 39 => "Boxing",
    Dance = 42 => "Dance",
    Pilates = 43 => "Pilates",
    Yoga = 44 => "Yoga",
    Weightlifting = 45 => "Weightlifting",
    CrossCountrySkiing = 47 => "Cross Country Skiing",
    FunctionalFitness = 48 => "Functional Fitness",
    Duathlon = 49 => "Duathlon",
    Gymnastics = 51 => "Gymnastics",
    HikingRucking = 52 => "Hiking/Rucking",
    HorsebackRiding = 53 => "Horseback Riding",
    Kayaking = 55 => "Kayaking",
    MartialArts = 56 => "Martial Arts",
    MountainBiking = 57 => "Mountain Biking",
    Powerlifting = 59 => "Powerlifting",
    RockClimbing = 60 => "Rock Climbing",
    Paddleboarding = 61 => "Paddleboarding",
    Triathlon = 62 => "Triathlon",
    Walking = 63 => "Walking",
    Surfing = 64 => "Surfing",
    Elliptical = 65 => "Elliptical",
    Stairmaster = 66 => "Stairmaster",
    Meditation = 70 => "Meditation",
    Other = 71 => "Other",
    Diving = 73 => "Diving",
    OperationsTactical = 74 => "Operations - Tactical",
    OperationsMedical = 75 => "Operations - Medical",
    OperationsFlying = 76 => "Operations - Flying",
    OperationsWater = 77 => "Operations - Water",
    Ultimate = 82 => "Ultimate",
    Climber = 83 => "Climber",
    JumpingRope = 84 => "Jumping Rope",
    AustralianFootball = 85 => "Australian Football",
    Skateboarding = 86 => "Skateboarding",
    Coaching = 87 => "Coaching",
    IceBath = 88 => "Ice Bath",
    Commuting = 89 => "Commuting",
    Gaming = 90 => "Gaming",
    Snowboarding = 91 => "Snowboarding",
    Motocross = 92 => "Motocross",
    Caddying = 93 => "Caddying",
    ObstacleCourseRacing = 94 => "Obstacle Course Racing",
    MotorRacing = 95 => "Motor Racing",
    Hiit = 96 => "HIIT",
    Spin = 97 => "Spin",
    JiuJitsu = 98 => "Jiu Jitsu",
    ManualLabor = 99 => "Manual Labor",
    Cricket = 100 => "Cricket",
    Pickleball = 101 => "Pickleball",
    InlineSkating = 102 => "Inline Skating",
    BoxFitness = 103 => "Box Fitness",
    Spikeball = 104 => "Spikeball",
    WheelchairPushing = 105 => "Wheelchair Pushing",
    PaddleTennis = 106 => "Paddle Tennis",
    Barre = 107 => "Barre",
    StagePerformance = 108 => "Stage Performance",
    HighStressWork = 109 => "High Stress Work",
    Parkour = 110 => "Parkour",
    GaelicFootball = 111 => "Gaelic Football",
    HurlingCamogie = 112 => "Hurling/Camogie",
    CircusArts = 113 => "Circus Arts",
    MassageTherapy = 121 => "Massage Therapy",
    StrengthTrainer = 123 => "Strength Trainer",
    WatchingSports = 125 => "Watching Sports",
    AssaultBike = 126 => "Assault Bike",
    Kickboxing = 127 => "Kickboxing",
    Stretching = 128 => "Stretching",
    TableTennis = 230 => "Table Tennis",
    Badminton = 231 => "Badminton",
    Netball = 232 => "Netball",
    Sauna = 233 => "Sauna",
    DiscGolf = 234 => "Disc Golf",
    YardWork = 235 => "Yard Work",
    AirCompression = 236 => "Air Compression",
    PercussiveMassage = 237 => "Percussive Massage",
    Paintball = 238 => "Paintball",
    IceSkating = 239 => "Ice Skating",
    Handball = 240 => "Handball",
}

impl Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Human readable name for a sport code, `"Unknown"` when the code is not known.
pub fn sport_name(code: i64) -> &'static str {
    Sport::from_code(code).map_or(UNKNOWN_SPORT, Sport::name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(sport_name(0), "Running");
        assert_eq!(sport_name(-1), "Activity");
        assert_eq!(sport_name(96), "HIIT");
        assert_eq!(sport_name(240), "Handball");
    }

    #[test]
    fn unknown_codes() {
        assert_eq!(sport_name(9999), UNKNOWN_SPORT);
        assert_eq!(sport_name(2), UNKNOWN_SPORT);
        assert_eq!(sport_name(-2), UNKNOWN_SPORT);
    }

    #[test]
    fn short_names_and_gaps() {
        assert_eq!(sport_name(85), "Australian Football");
        assert_eq!(sport_name(230), "Table Tennis");
        assert_eq!(sport_name(235), "Yard Work");
        assert_eq!(sport_name(237), "Percussive Massage");

        for code in [46, 50, 54, 58, 67, 68, 69, 72, 116, 131, 241, 275, 1000] {
            assert_eq!(sport_name(code), UNKNOWN_SPORT, "code {code}");
        }
    }

    #[test]
    fn codes_round_trip_through_table() {
        for sport in Sport::ALL {
            assert_eq!(Sport::from_code(sport.code()), Some(*sport));
        }
        assert_eq!(Sport::ALL.len(), 102);
    }
}
