//! Fixtures for tests
use crate::disc_rates::DiscRates;
use crate::exposures::{Exposure, Exposures, ExposuresMetadata};
use crate::impact_funcs::{ImpactFunc, ImpactFuncs};
use crate::measures::{Measure, Measures, Modifier};
use crate::units::{Dimensionless, Money};
use rstest::fixture;
use std::fs;
use std::path::Path;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

#[fixture]
pub fn disc_rates() -> DiscRates {
    DiscRates::from_rates((2000..=2002).map(|year| (year, 0.02)))
}

#[fixture]
pub fn exposure() -> Exposure {
    Exposure {
        id: "house1".into(),
        latitude: 26.93,
        longitude: -80.13,
        value: Money(1000.0),
        deductible: Money(0.0),
        cover: Money(1000.0),
        impact_id: 1,
        category_id: None,
        region_id: Some(840),
    }
}

#[fixture]
pub fn exposures(exposure: Exposure) -> Exposures {
    Exposures::from_exposures(
        vec![
            exposure.clone(),
            Exposure {
                id: "house2".into(),
                value: Money(2000.0),
                cover: Money(2000.0),
                ..exposure
            },
        ],
        ExposuresMetadata::default(),
    )
}

#[fixture]
pub fn impact_func() -> ImpactFunc {
    ImpactFunc {
        haz_type: "TC".into(),
        id: 1,
        name: "Tropical cyclone default".into(),
        intensity_unit: "m/s".into(),
        intensity: vec![0.0, 50.0, 100.0],
        mdd: vec![0.0, 0.5, 1.0],
        paa: vec![0.0, 1.0, 1.0],
    }
}

#[fixture]
pub fn impact_funcs(impact_func: ImpactFunc) -> ImpactFuncs {
    let mut funcs = ImpactFuncs::new();
    funcs.add_func(impact_func.clone());
    funcs.add_func(ImpactFunc {
        id: 2,
        name: "Tropical cyclone weak".into(),
        ..impact_func.clone()
    });
    funcs.add_func(ImpactFunc {
        haz_type: "FL".into(),
        name: "Flood".into(),
        intensity_unit: "m".into(),
        intensity: vec![0.0, 1.0, 2.0],
        ..impact_func
    });
    funcs
}

#[fixture]
pub fn measure() -> Measure {
    Measure {
        id: "Mangroves".into(),
        haz_type: "TC".into(),
        cost: Money(1_311_768_000.0),
        hazard_freq_cutoff: Dimensionless(0.0),
        hazard_intensity: Modifier {
            mult: Dimensionless(1.0),
            add: -10.0,
        },
        mdd_impact: Modifier::default(),
        paa_impact: Modifier::default(),
        risk_transf_attach: Money(0.0),
        risk_transf_cover: Money(0.0),
    }
}

#[fixture]
pub fn measures(measure: Measure) -> Measures {
    Measures::from_measures(vec![
        measure.clone(),
        Measure {
            id: "Seawall".into(),
            hazard_intensity: Modifier::default(),
            hazard_freq_cutoff: Dimensionless(0.1),
            ..measure.clone()
        },
        Measure {
            id: "Dikes".into(),
            haz_type: "FL".into(),
            ..measure
        },
    ])
}

/// Contents of the files in a valid entity folder
pub const ENTITY_FILES: [(&str, &str); 5] = [
    (
        "exposures.csv",
        "id,latitude,longitude,value,deductible,cover,impact_id,category_id,region_id
house1,26.93,-80.13,1000,0,1000,1,,840
house2,26.96,-80.10,2000,100,,1,2,840
",
    ),
    (
        "impact_funcs.csv",
        "haz_type,id,name,intensity_unit,intensity,mdd,paa
TC,1,Tropical cyclone default,m/s,0,0,0
TC,1,Tropical cyclone default,m/s,50,0.5,1
TC,1,Tropical cyclone default,m/s,100,1,1
",
    ),
    (
        "disc_rates.csv",
        "year,rate
2000,0.02
2001,0.02
2002,0.02
",
    ),
    (
        "measures.csv",
        "name,haz_type,cost,hazard_freq_cutoff,hazard_intensity_mult,hazard_intensity_add
Mangroves,TC,1311768000,0,1,-10
",
    ),
    ("entity.toml", "ref_year = 2020\nvalue_unit = \"USD\"\n"),
];

/// Write a valid entity folder to `dir_path`
pub fn write_entity_folder(dir_path: &Path) {
    for (file_name, contents) in ENTITY_FILES {
        fs::write(dir_path.join(file_name), contents).unwrap();
    }
}
