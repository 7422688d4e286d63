use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::{AprioriError, MinerConfig};

impl From<AprioriError> for PyErr {
    fn from(err: AprioriError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn validated(config: MinerConfig) -> PyResult<MinerConfig> {
    config.validate().map_err(AprioriError::from)?;
    Ok(config)
}

/// Frequent itemsets, and the same itemsets paired with their support counts.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support, /)")]
fn frequent_itemsets(
    transactions: Vec<Vec<String>>,
    min_support: f32,
) -> PyResult<(Vec<Vec<String>>, Vec<(Vec<String>, u32)>)> {
    let config = validated(MinerConfig::new(min_support))?;
    let itemsets = crate::generate_frequent_itemsets(&transactions, &config)?;
    Ok(crate::split_supports(itemsets))
}

/// Association rules as `[antecedent.., "=>", consequent..]` lists.
#[pyfunction]
#[pyo3(text_signature = "(transactions, min_support, min_confidence, /)")]
fn association_rules(
    transactions: Vec<Vec<String>>,
    min_support: f32,
    min_confidence: f32,
) -> PyResult<Vec<Vec<String>>> {
    let config = validated(MinerConfig::new(min_support).with_min_confidence(min_confidence))?;
    let rules = crate::generate_association_rules(&transactions, &config)?;
    Ok(rules.iter().map(|rule| rule.to_tokens()).collect())
}

#[pymodule]
fn apriori_miner(_: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(frequent_itemsets, m)?)?;
    m.add_function(wrap_pyfunction!(association_rules, m)?)?;
    Ok(())
}
