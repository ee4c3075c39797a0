// tests/support/builders.rs
use campus_core::domain::entity::{Changeset, Value};
use campus_core::domain::school::{Payment, Student};

pub struct StudentBuilder {
    code: String,
    first_name: String,
    last_name: String,
    plantel_id: Option<i64>,
    status: String,
    email: Option<String>,
}

impl StudentBuilder {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.into(),
            first_name: "Ana".into(),
            last_name: "López".into(),
            plantel_id: None,
            status: "active".into(),
            email: None,
        }
    }

    pub fn plantel(mut self, plantel_id: i64) -> Self {
        self.plantel_id = Some(plantel_id);
        self
    }

    pub fn name(mut self, first: &str, last: &str) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = status.into();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn build(self) -> Changeset<Student> {
        let mut data = Changeset::new()
            .set("student_id", self.code)
            .unwrap()
            .set("first_name", self.first_name)
            .unwrap()
            .set("last_name", self.last_name)
            .unwrap()
            .set("status", self.status)
            .unwrap()
            .set("email", Value::from(self.email))
            .unwrap();
        if let Some(plantel_id) = self.plantel_id {
            data = data.set("plantel_id", plantel_id).unwrap();
        }
        data
    }
}

pub struct PaymentBuilder {
    student_id: i64,
    amount: String,
    discount: Option<String>,
    late_fee: Option<String>,
}

impl PaymentBuilder {
    pub fn new(student_id: i64, amount: &str) -> Self {
        Self {
            student_id,
            amount: amount.into(),
            discount: None,
            late_fee: None,
        }
    }

    pub fn discount(mut self, discount: &str) -> Self {
        self.discount = Some(discount.into());
        self
    }

    pub fn late_fee(mut self, late_fee: &str) -> Self {
        self.late_fee = Some(late_fee.into());
        self
    }

    pub fn build(self) -> Changeset<Payment> {
        let mut data = Changeset::new()
            .set("student_id", self.student_id)
            .unwrap()
            .set("cycle_id", 1)
            .unwrap()
            .set("concept_type", "monthly_fee")
            .unwrap()
            .set("concept_description", "Colegiatura febrero")
            .unwrap()
            .set("amount", self.amount.as_str())
            .unwrap()
            .set("payment_method", "cash")
            .unwrap();
        if let Some(discount) = self.discount {
            data = data.set("discount", discount).unwrap();
        }
        if let Some(late_fee) = self.late_fee {
            data = data.set("late_fee", late_fee).unwrap();
        }
        data
    }
}
