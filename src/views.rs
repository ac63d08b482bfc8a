use actix_web::HttpResponse;
use handlebars::{Handlebars, TemplateError};
use serde_json::{Value, json};
use strum::IntoEnumIterator;

use crate::error::AppResult;
use crate::model::employee::{Employee, EmployeeFilter};
use crate::schema::Column;

pub const INVALID_CREDENTIALS: &str = "Usuário ou senha inválidos.";

/// HTML pages, compiled once at startup.
pub struct Views {
    registry: Handlebars<'static>,
}

#[derive(Debug, Clone, Copy)]
pub enum FormAction {
    Add,
    Edit(i64),
}

impl FormAction {
    fn title(self) -> &'static str {
        match self {
            FormAction::Add => "Adicionar",
            FormAction::Edit(_) => "Editar",
        }
    }

    fn url(self) -> String {
        match self {
            FormAction::Add => "/funcionarios/add".to_string(),
            FormAction::Edit(id) => format!("/funcionarios/edit/{id}"),
        }
    }
}

impl Views {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("header", include_str!("../templates/header.hbs"))?;
        registry.register_template_string("login", include_str!("../templates/login.hbs"))?;
        registry.register_template_string("list", include_str!("../templates/list.hbs"))?;
        registry.register_template_string("form", include_str!("../templates/form.hbs"))?;

        Ok(Self { registry })
    }

    fn render(&self, name: &str, context: &Value) -> AppResult<HttpResponse> {
        let body = self.registry.render(name, context)?;
        Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body))
    }

    pub fn login(&self, error: Option<&str>) -> AppResult<HttpResponse> {
        self.render("login", &json!({ "error": error }))
    }

    pub fn employee_list(
        &self,
        username: &str,
        employees: &[Employee],
        filter: Option<&EmployeeFilter>,
    ) -> AppResult<HttpResponse> {
        let selected = filter.map(|f| f.column).unwrap_or(Column::Funcionario);

        let headers: Vec<&str> = std::iter::once("ID")
            .chain(Column::iter().map(Column::label))
            .collect();
        let columns: Vec<Value> = Column::iter()
            .map(|column| {
                json!({
                    "name": column.name(),
                    "label": column.label(),
                    "selected": column == selected,
                })
            })
            .collect();
        let rows: Vec<Value> = employees
            .iter()
            .map(|employee| {
                let cells: Vec<&str> = employee
                    .values
                    .iter()
                    .map(|value| value.as_deref().unwrap_or(""))
                    .collect();
                json!({ "id": employee.id, "cells": cells })
            })
            .collect();

        self.render(
            "list",
            &json!({
                "username": username,
                "headers": headers,
                "columns": columns,
                "rows": rows,
                "total": employees.len(),
                "valor": filter.map(|f| f.value.as_str()).unwrap_or(""),
            }),
        )
    }

    pub fn employee_form(
        &self,
        action: FormAction,
        employee: Option<&Employee>,
    ) -> AppResult<HttpResponse> {
        let fields: Vec<Value> = Column::iter()
            .map(|column| {
                json!({
                    "name": column.name(),
                    "label": column.label(),
                    "value": employee.and_then(|e| e.get(column)).unwrap_or(""),
                })
            })
            .collect();

        self.render(
            "form",
            &json!({
                "acao": action.title(),
                "action": action.url(),
                "fields": fields,
            }),
        )
    }
}
