//! The built-in car configuration table.
//!
//! Six attributes and twenty-one forward rules: base rules tying each model,
//! color, and motor choice to its usage, price class, and drivetrain, plus
//! the restriction rules (diesel limousines, benzin limousines, transporters,
//! cabrios, and the red cabrio exception). Transporters are restricted by
//! forbidding benzin only; diesel and electric stay available.

use crate::catalog::table::{ComparisonDef, ConditionDef, ConfigTable, RuleDef, VariableDef};

pub mod model {
    pub const LIMOUSINE: i64 = 1;
    pub const COMBI: i64 = 2;
    pub const SUV: i64 = 3;
    pub const CABRIO: i64 = 4;
    pub const VAN: i64 = 5;
}

pub mod color {
    pub const BLACK: i64 = 1;
    pub const WHITE: i64 = 2;
    pub const GRAY: i64 = 3;
    pub const BLUE: i64 = 4;
    pub const RED: i64 = 5;
}

pub mod usage {
    pub const PKW: i64 = 0;
    pub const TRANSPORTER: i64 = 1;
}

pub mod price {
    pub const STANDARD: i64 = 0;
    pub const CLASS1: i64 = 1;
    pub const CLASS2: i64 = 2;
}

pub mod drive {
    pub const BENZIN: i64 = 0;
    pub const DIESEL: i64 = 1;
    pub const ELECTRIC: i64 = 2;
}

fn variable(name: &str, values: &[i64], labels: &[(i64, &str)]) -> VariableDef {
    VariableDef {
        name: name.to_string(),
        values: values.to_vec(),
        labels: labels
            .iter()
            .map(|&(value, label)| (value, label.to_string()))
            .collect(),
    }
}

/// The full car table.
pub fn table() -> ConfigTable {
    let eq = ComparisonDef::eq;
    let ne = ComparisonDef::ne;

    let variables = vec![
        variable(
            "model",
            &[1, 2, 3, 4, 5],
            &[
                (model::LIMOUSINE, "limousine"),
                (model::COMBI, "combi"),
                (model::SUV, "suv"),
                (model::CABRIO, "cabrio"),
                (model::VAN, "van"),
            ],
        ),
        variable(
            "color",
            &[1, 2, 3, 4, 5],
            &[
                (color::BLACK, "black"),
                (color::WHITE, "white"),
                (color::GRAY, "gray"),
                (color::BLUE, "blue"),
                (color::RED, "red"),
            ],
        ),
        variable("motor", &[100, 140, 180, 220, 260], &[]),
        variable(
            "usage",
            &[0, 1],
            &[(usage::PKW, "pkw"), (usage::TRANSPORTER, "transporter")],
        ),
        variable(
            "price_class",
            &[0, 1, 2],
            &[
                (price::STANDARD, "standard"),
                (price::CLASS1, "class1"),
                (price::CLASS2, "class2"),
            ],
        ),
        variable(
            "drivetrain",
            &[0, 1, 2],
            &[
                (drive::BENZIN, "benzin"),
                (drive::DIESEL, "diesel"),
                (drive::ELECTRIC, "electric"),
            ],
        ),
    ];

    let rules = vec![
        // Every model determines its usage.
        RuleDef::new(eq("model", model::LIMOUSINE), eq("usage", usage::PKW)),
        RuleDef::new(eq("model", model::COMBI), eq("usage", usage::TRANSPORTER)),
        RuleDef::new(eq("model", model::SUV), eq("usage", usage::PKW)),
        RuleDef::new(eq("model", model::CABRIO), eq("usage", usage::PKW)),
        RuleDef::new(eq("model", model::VAN), eq("usage", usage::TRANSPORTER)),
        // Every color determines its price class.
        RuleDef::new(eq("color", color::BLACK), eq("price_class", price::STANDARD)),
        RuleDef::new(eq("color", color::WHITE), eq("price_class", price::CLASS1)),
        RuleDef::new(eq("color", color::GRAY), eq("price_class", price::CLASS1)),
        RuleDef::new(eq("color", color::BLUE), eq("price_class", price::CLASS2)),
        RuleDef::new(eq("color", color::RED), eq("price_class", price::CLASS2)),
        // Every motor determines its drivetrain.
        RuleDef::new(eq("motor", 100), eq("drivetrain", drive::BENZIN)),
        RuleDef::new(eq("motor", 140), eq("drivetrain", drive::DIESEL)),
        RuleDef::new(eq("motor", 180), eq("drivetrain", drive::DIESEL)),
        RuleDef::new(eq("motor", 220), eq("drivetrain", drive::BENZIN)),
        RuleDef::new(eq("motor", 260), eq("drivetrain", drive::ELECTRIC)),
        // Diesel limousines do not come in blue or gray.
        RuleDef::new(
            ConditionDef::all([
                eq("model", model::LIMOUSINE),
                eq("drivetrain", drive::DIESEL),
            ]),
            ConditionDef::all([ne("color", color::GRAY), ne("color", color::BLUE)]),
        ),
        // Benzin limousines do not exist in price class 1.
        RuleDef::new(
            ConditionDef::all([
                eq("model", model::LIMOUSINE),
                eq("drivetrain", drive::BENZIN),
            ]),
            ne("price_class", price::CLASS1),
        ),
        // Transporters are not available as benzin.
        RuleDef::new(
            eq("usage", usage::TRANSPORTER),
            ne("drivetrain", drive::BENZIN),
        ),
        // Cabrios are not available in standard colors.
        RuleDef::new(eq("model", model::CABRIO), ne("price_class", price::STANDARD)),
        // The red cabrio is the only electric cabrio.
        RuleDef::new(
            ConditionDef::all([eq("model", model::CABRIO), eq("color", color::RED)]),
            eq("drivetrain", drive::ELECTRIC),
        ),
        RuleDef::new(
            ConditionDef::all([eq("model", model::CABRIO), ne("color", color::RED)]),
            ne("drivetrain", drive::ELECTRIC),
        ),
    ];

    ConfigTable { variables, rules }
}
