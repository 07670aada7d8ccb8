use serde::Deserialize;

// Wire shapes for the ArcGIS REST responses:
//
// {
//   "features": [
//     { "attributes": { ... } },
//     ...
//   ]
// }

#[derive(Debug, Deserialize)]
pub struct FeatureSet<T> {
    #[serde(default = "Vec::new")]
    pub features: Vec<Feature<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Feature<T> {
    pub attributes: T,
}

/// Attributes returned by the lot-to-identifier service (layer 10).
#[derive(Debug, Deserialize)]
pub struct LotAttributes {
    pub ptlotsecpn: Option<String>,
    pub propid: Option<i64>,
    pub sppropid: Option<i64>,
}

/// Attributes returned by the GURAS address service (layer 9). The service
/// reports many more columns; only the ones the update touches are mapped.
#[derive(Debug, Deserialize)]
pub struct AddressAttributes {
    pub propid: Option<i64>,
    pub sppropid: Option<i64>,

    pub housenumberfirstprefix: Option<String>,
    pub housenumberfirst: Option<i64>,
    pub housenumberfirstsuffix: Option<String>,
    pub housenumbersecondprefix: Option<String>,
    pub housenumbersecond: Option<i64>,
    pub housenumbersecondsuffix: Option<String>,

    pub roadname: Option<String>,
    pub roadtype: Option<String>,
    pub roadsuffix: Option<String>,
    pub secondroadname: Option<String>,
    pub secondroadtype: Option<String>,
    pub secondroadsuffix: Option<String>,

    pub unittype: Option<String>,
    pub unitnumberprefix: Option<String>,
    pub unitnumber: Option<i64>,
    pub unitnumbersuffix: Option<String>,

    pub leveltype: Option<String>,
    pub levelnumberprefix: Option<String>,
    pub levelnumber: Option<String>,
    pub levelnumbersuffix: Option<String>,

    pub buildingname: Option<String>,
    pub locationdescription: Option<String>,

    pub suburbname: Option<String>,
    pub postcode: Option<i64>,
}
