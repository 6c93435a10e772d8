use serde_json::Value;

#[derive(Clone)]
pub struct ToolRegistry {
    declarations: Value,
}

impl ToolRegistry {
    pub fn new() -> Self {
        // Single source of truth for the function declarations the model sees
        let declarations = serde_json::json!([
            {
                "name": "get_market_data",
                "description":
                    "Fetches mandi (wholesale market) price records for a commodity, \
                     optionally narrowed by state, district, market, or date.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "commodityName": {
                            "type": "string",
                            "description": "Commodity to look up, e.g. 'Tomato'"
                        },
                        "state": {
                            "type": "string",
                            "description": "State to filter by (optional)"
                        },
                        "district": {
                            "type": "string",
                            "description": "District to filter by (optional)"
                        },
                        "market": {
                            "type": "string",
                            "description": "Specific mandi to filter by (optional)"
                        },
                        "arrivalDate": {
                            "type": "string",
                            "description": "Exact arrival date, YYYY-MM-DD (optional)"
                        },
                        "startDate": {
                            "type": "string",
                            "description": "Range start, YYYY-MM-DD (optional)"
                        },
                        "endDate": {
                            "type": "string",
                            "description": "Range end, YYYY-MM-DD (optional)"
                        }
                    },
                    "required": ["commodityName"]
                }
            },
            {
                "name": "compare_state_market_data",
                "description":
                    "Compares mandi prices for one commodity across several states \
                     or districts. Provide states, or district when comparing within \
                     a state.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "commodityName": {
                            "type": "string",
                            "description": "Commodity to compare"
                        },
                        "states": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "States to compare across"
                        },
                        "district": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Districts to compare across"
                        },
                        "arrivalDate": {
                            "type": "string",
                            "description": "Exact arrival date, YYYY-MM-DD (optional)"
                        },
                        "startDate": {
                            "type": "string",
                            "description": "Range start, YYYY-MM-DD (optional)"
                        },
                        "endDate": {
                            "type": "string",
                            "description": "Range end, YYYY-MM-DD (optional)"
                        }
                    },
                    "required": ["commodityName"]
                }
            },
            {
                "name": "get_government_schemes",
                "description":
                    "Searches central and state government schemes relevant to a \
                     farmer's question and location.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "What the farmer wants help with"
                        },
                        "location": {
                            "type": "string",
                            "description": "State or district the farmer is in"
                        }
                    },
                    "required": ["query", "location"]
                }
            },
            {
                "name": "diagnose_crop_disease",
                "description":
                    "Diagnoses a crop disease from a photo of the affected plant. \
                     When no image is supplied the app prompts the user to capture \
                     one.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "image": {
                            "type": "string",
                            "description": "Photo of the plant as a data URI (optional)"
                        }
                    }
                }
            }
        ]);
        Self { declarations }
    }

    pub fn declarations(&self) -> &Value {
        &self.declarations
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
