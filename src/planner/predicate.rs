//! The filter predicate AST (§6, §4.4) and the projection rules each
//! variant forces (§4.4 step 1, §8: "project exactly `{id, email}` ∪
//! fields forced by the predicates present").

use crate::model::{AccountId, Sex, Status};

/// One parsed, already-validated `/accounts/filter/` parameter. Parsing
/// from the raw query string (and rejecting unrecognized keys, empty
/// values, unparseable integers) happens in `crate::api`; by the time a
/// `FilterPredicate` exists it is known well-formed.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate {
    SexEq(Sex),
    EmailDomain(String),
    EmailLt(String),
    EmailGt(String),
    StatusEq(Status),
    StatusNeq(Status),
    FnameEq(String),
    FnameAny(Vec<String>),
    FnameNull(bool),
    SnameEq(String),
    SnameStarts(String),
    SnameNull(bool),
    PhoneCode(String),
    PhoneNull(bool),
    CountryEq(String),
    CountryNull(bool),
    CityEq(String),
    CityAny(Vec<String>),
    CityNull(bool),
    BirthLt(i64),
    BirthGt(i64),
    BirthYear(i32),
    InterestsContains(Vec<String>),
    InterestsAny(Vec<String>),
    LikesContains(Vec<AccountId>),
    PremiumNow,
    PremiumNull(bool),
}

/// The set of output fields a filter response must contain, beyond the
/// always-present `id`/`email`. `interests`, `likes` and `joined` are
/// never part of a filter projection (§4.4 step 3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Projection {
    pub sex: bool,
    pub status: bool,
    pub fname: bool,
    pub sname: bool,
    pub phone: bool,
    pub country: bool,
    pub city: bool,
    pub birth: bool,
    pub premium: bool,
}

impl Projection {
    /// Recommend's fixed projection (§4.4.2): `{id, email, status, fname,
    /// sname, birth, premium}`, no interests.
    pub fn recommend_fixed() -> Self {
        Projection {
            status: true,
            fname: true,
            sname: true,
            birth: true,
            premium: true,
            ..Projection::default()
        }
    }

    /// Suggest's fixed projection (§4.4.3): `{id, email, status, fname,
    /// sname}`.
    pub fn suggest_fixed() -> Self {
        Projection {
            status: true,
            fname: true,
            sname: true,
            ..Projection::default()
        }
    }

    pub fn merge(&mut self, other: Projection) {
        self.sex |= other.sex;
        self.status |= other.status;
        self.fname |= other.fname;
        self.sname |= other.sname;
        self.phone |= other.phone;
        self.country |= other.country;
        self.city |= other.city;
        self.birth |= other.birth;
        self.premium |= other.premium;
    }
}

impl FilterPredicate {
    /// The fields this predicate alone forces into the projection.
    pub fn forces(&self) -> Projection {
        let mut p = Projection::default();
        match self {
            FilterPredicate::SexEq(_) => p.sex = true,
            FilterPredicate::StatusEq(_) | FilterPredicate::StatusNeq(_) => p.status = true,
            FilterPredicate::FnameEq(_) | FilterPredicate::FnameAny(_) | FilterPredicate::FnameNull(_) => {
                p.fname = true
            }
            FilterPredicate::SnameEq(_) | FilterPredicate::SnameStarts(_) | FilterPredicate::SnameNull(_) => {
                p.sname = true
            }
            FilterPredicate::PhoneCode(_) | FilterPredicate::PhoneNull(_) => p.phone = true,
            FilterPredicate::CountryEq(_) | FilterPredicate::CountryNull(_) => p.country = true,
            FilterPredicate::CityEq(_) | FilterPredicate::CityAny(_) | FilterPredicate::CityNull(_) => {
                p.city = true
            }
            FilterPredicate::BirthLt(_) | FilterPredicate::BirthGt(_) | FilterPredicate::BirthYear(_) => {
                p.birth = true
            }
            FilterPredicate::PremiumNow | FilterPredicate::PremiumNull(_) => p.premium = true,
            FilterPredicate::EmailDomain(_)
            | FilterPredicate::EmailLt(_)
            | FilterPredicate::EmailGt(_)
            | FilterPredicate::InterestsContains(_)
            | FilterPredicate::InterestsAny(_)
            | FilterPredicate::LikesContains(_) => {}
        }
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_eq_forces_only_sex() {
        let p = FilterPredicate::SexEq(Sex::Female).forces();
        assert!(p.sex);
        assert!(!p.status);
        assert!(!p.premium);
    }

    #[test]
    fn interests_predicates_force_nothing() {
        let p = FilterPredicate::InterestsAny(vec!["tea".into()]).forces();
        assert_eq!(p, Projection::default());
    }

    #[test]
    fn merge_is_a_union() {
        let mut p = FilterPredicate::SexEq(Sex::Male).forces();
        p.merge(FilterPredicate::PremiumNow.forces());
        assert!(p.sex);
        assert!(p.premium);
    }
}
